use std::str::FromStr;

use itertools::Itertools;
use lazy_static::lazy_static;

use crate::error::{AllocError, Result};

/// Default identifier repertoire. `$` and `_` lead, then digits and letters
/// interleaved so that short names spread over both cases early.
pub const DEFAULT_ORDER: &[u8] = b"$_0aA1bB2cC3dD4eE5fF6gG7hH8iI9jJkKlLmMnNoOpPqQrRsStTuUvVwWxXyYzZ";

lazy_static! {
    static ref DEFAULT_ALPHABET: Alphabet = Alphabet {
        bytes: DEFAULT_ORDER.to_vec(),
    };
}

/// Ordered set of bytes that identifiers are built from.
///
/// The order is significant: it is the order children are generated in during
/// expansion, and therefore the tie-break priority when two candidates score
/// the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    bytes: Vec<u8>,
}

impl Alphabet {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(AllocError::InvalidAlphabet("alphabet is empty".to_string()));
        }

        if let Some(dup) = bytes.iter().duplicates().next() {
            return Err(AllocError::InvalidAlphabet(format!(
                "byte {:?} appears more than once",
                *dup as char
            )));
        }

        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().copied()
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.bytes.contains(&byte)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        DEFAULT_ALPHABET.clone()
    }
}

impl FromStr for Alphabet {
    type Err = AllocError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.as_bytes())
    }
}
