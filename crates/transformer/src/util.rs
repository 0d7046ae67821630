use std::io::Write;

use anyhow::Result;
use flate2::{write::GzEncoder, Compression};
use serde::Serialize;

pub fn gzip_size(content: &[u8]) -> Result<usize> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content)?;
    Ok(encoder.finish()?.len())
}

/// Raw and gzip sizes before and after renaming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStats {
    pub original_size: usize,
    pub output_size: usize,
    pub original_gzip_size: usize,
    pub output_gzip_size: usize,
}

impl CompressionStats {
    pub fn measure(original: &[u8], output: &[u8]) -> Result<Self> {
        Ok(Self {
            original_size: original.len(),
            output_size: output.len(),
            original_gzip_size: gzip_size(original)?,
            output_gzip_size: gzip_size(output)?,
        })
    }
}
