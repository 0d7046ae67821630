use std::sync::Arc;

use mangle_core::DEFAULT_MAX_LENGTH;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    collector::{tokenize, IdentCollector},
    filter::filter_mangle_candidates,
    replacer::IdentReplacer,
    util::CompressionStats,
};

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOption {
    pub filename: Option<String>,
    /// identifiers starting with this prefix are renamed
    pub mangle_prefix: Option<String>,
    /// identifiers renamed regardless of prefix
    pub mangle_names: Vec<String>,
    /// never renamed and never handed out
    pub preserve_keywords: Vec<String>,
    /// overrides the default identifier alphabet
    pub alphabet: Option<String>,
    pub min_occurrences: usize,
    pub reserve_ecmascript: bool,
    pub max_length: usize,
    pub stats: bool,
}

impl Default for TransformOption {
    fn default() -> Self {
        Self {
            filename: None,
            mangle_prefix: None,
            mangle_names: Vec::new(),
            preserve_keywords: Vec::new(),
            alphabet: None,
            min_occurrences: 1,
            reserve_ecmascript: true,
            max_length: DEFAULT_MAX_LENGTH,
            stats: false,
        }
    }
}

#[derive(Debug)]
pub struct TransformContext {
    pub options: TransformOption,
}

impl TransformContext {
    pub fn new(options: TransformOption) -> Arc<Self> {
        Arc::new(Self { options })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub content: String,
    /// `(original, replacement)` in allocation order
    pub ident_map: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CompressionStats>,
}

pub fn transform(content: String, options: TransformOption) -> Result<TransformResult> {
    let context = TransformContext::new(options);
    let segments = tokenize(&content);

    // collection
    let mut collector = IdentCollector::new().with_context(&context);
    collector.visit(&segments);

    // order by usage, drop what is not worth renaming
    let candidates = filter_mangle_candidates(&collector, context.options.min_occurrences);

    debug!(
        file = context.options.filename.as_deref().unwrap_or("<input>"),
        candidates = candidates.len(),
        protected = collector.used_ident.len(),
        "collected identifiers"
    );

    // allocate in descending usage order
    let mut replacer = IdentReplacer::new(&context, &segments, &candidates)?;
    for (ident, count) in &candidates {
        replacer.alloc_ident(ident, *count)?;
    }

    let output = replacer.replace(&segments);

    let stats = if context.options.stats {
        Some(CompressionStats::measure(content.as_bytes(), output.as_bytes())?)
    } else {
        None
    };

    Ok(TransformResult {
        content: output,
        ident_map: replacer.into_ident_map(),
        stats,
    })
}
