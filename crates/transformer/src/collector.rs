use rustc_hash::{FxHashMap, FxHashSet};

use crate::transformer::TransformContext;

/// A run of source text: either one identifier or everything between two
/// identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Ident(&'a str),
    Text(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Ident(s) | Segment::Text(s) => *s,
        }
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte == b'$' || byte == b'_' || byte.is_ascii_alphabetic() || !byte.is_ascii()
}

fn is_ident_part(byte: u8) -> bool {
    is_ident_start(byte) || byte.is_ascii_digit()
}

/// The `$` of a template substitution `${` is punctuation.
fn is_template_open(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{')
}

/// Splits `content` into identifier and text segments.
///
/// This is a byte scanner, not a lexer: identifiers inside strings and
/// comments are found too. Numeric literals (`1e5`, `0xff`, `1.5e-3`) are
/// kept as text so that their letters are never mistaken for names, and so
/// is the `$` that opens a template substitution. Every non-ASCII byte counts
/// as an identifier byte, so `café` is one name.
pub fn tokenize(content: &str) -> Vec<Segment<'_>> {
    let bytes = content.as_bytes();
    let mut segments = vec![];
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];

        if byte.is_ascii_digit() {
            while i < bytes.len() && (is_ident_part(bytes[i]) || bytes[i] == b'.') {
                i += 1;
            }
            continue;
        }

        if !is_ident_start(byte) || is_template_open(bytes, i) {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && is_ident_part(bytes[i]) && !is_template_open(bytes, i) {
            i += 1;
        }

        if text_start < start {
            segments.push(Segment::Text(&content[text_start..start]));
        }
        segments.push(Segment::Ident(&content[start..i]));
        text_start = i;
    }

    if text_start < bytes.len() {
        segments.push(Segment::Text(&content[text_start..]));
    }

    segments
}

#[derive(Debug, Default)]
pub struct IdentCollector {
    /// occurrences of every identifier selected for renaming
    pub field: FxHashMap<String, usize>,
    /// index of the first occurrence, for stable ordering
    pub first_seen: FxHashMap<String, usize>,
    /// identifiers that stay as they are
    pub used_ident: FxHashSet<String>,
    mangle_prefix: Option<String>,
    mangle_names: FxHashSet<String>,
    preserve_keywords: FxHashSet<String>,
}

impl IdentCollector {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_context(mut self, context: &TransformContext) -> Self {
        self.mangle_prefix = context
            .options
            .mangle_prefix
            .clone()
            .filter(|prefix| !prefix.is_empty());
        self.mangle_names = context.options.mangle_names.iter().cloned().collect();
        self.preserve_keywords = context.options.preserve_keywords.iter().cloned().collect();
        self
    }

    pub fn is_mangle_candidate(&self, ident: &str) -> bool {
        if self.preserve_keywords.contains(ident) {
            return false;
        }

        self.mangle_names.contains(ident)
            || self
                .mangle_prefix
                .as_deref()
                .is_some_and(|prefix| ident.starts_with(prefix))
    }

    fn count_str(&mut self, ident: &str, index: usize) {
        let count = self.field.entry(ident.to_string()).or_insert(0);
        *count += 1;
        self.first_seen.entry(ident.to_string()).or_insert(index);
    }

    pub fn visit(&mut self, segments: &[Segment<'_>]) {
        for (index, segment) in segments.iter().enumerate() {
            let Segment::Ident(ident) = segment else {
                continue;
            };

            if self.is_mangle_candidate(ident) {
                self.count_str(ident, index);
            } else {
                self.used_ident.insert(ident.to_string());
            }
        }
    }
}
