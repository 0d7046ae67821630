use anyhow::Context;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use mangle_core::{Alphabet, Reserved, TokenAllocator};

use crate::{collector::Segment, transformer::TransformContext};

type Result<T> = anyhow::Result<T>;

#[derive(Debug)]
pub struct IdentReplacer {
    pub ident_map: FxHashMap<String, String>,
    pub allocator: TokenAllocator<Reserved>,
    order: Vec<String>,
}

impl IdentReplacer {
    /// Prepares an allocator for `candidates`.
    ///
    /// Everything that stays in the output (text and untouched identifiers)
    /// seeds the ambient statistics, and every untouched identifier is
    /// blacklisted so no replacement can collide with it.
    pub fn new(
        context: &TransformContext,
        segments: &[Segment<'_>],
        candidates: &[(String, usize)],
    ) -> Result<Self> {
        let options = &context.options;
        let renamed = candidates
            .iter()
            .map(|(ident, _)| ident.as_str())
            .collect::<FxHashSet<_>>();

        let mut policy = if options.reserve_ecmascript {
            Reserved::ecmascript()
        } else {
            Reserved::new()
        };
        policy.extend(&options.preserve_keywords);

        let mut protected = vec![];
        for segment in segments {
            match segment {
                Segment::Ident(ident) if renamed.contains(ident) => {}
                Segment::Ident(ident) => {
                    policy.insert(ident);
                    protected.push(*ident);
                }
                Segment::Text(text) => protected.push(*text),
            }
        }

        let alphabet = match &options.alphabet {
            Some(alphabet) => alphabet
                .parse::<Alphabet>()
                .with_context(|| format!("invalid alphabet {alphabet:?}"))?,
            None => Alphabet::default(),
        };

        let mut allocator = TokenAllocator::with_policy(policy)
            .with_alphabet(alphabet)
            .with_max_length(options.max_length);

        for text in protected {
            allocator.append_ambience(text.as_bytes(), 1);
        }

        allocator.init()?;

        Ok(Self {
            ident_map: FxHashMap::default(),
            allocator,
            order: vec![],
        })
    }

    /// Replacement for `ident`, allocating one weighted by `count` on first
    /// use.
    pub fn alloc_ident(&mut self, ident: &str, count: usize) -> Result<String> {
        if let Some(v) = self.ident_map.get(ident) {
            return Ok(v.to_string());
        }

        let s = self
            .allocator
            .generate(count as u64)
            .with_context(|| format!("failed to allocate a name for {ident}"))?
            .to_string();

        debug!(from = ident, to = %s, count, "rename");

        self.ident_map.insert(ident.to_string(), s.clone());
        self.order.push(ident.to_string());

        Ok(s)
    }

    pub fn replace(&self, segments: &[Segment<'_>]) -> String {
        let mut out = String::new();

        for segment in segments {
            match segment {
                Segment::Ident(ident) => match self.ident_map.get(*ident) {
                    Some(renamed) => out.push_str(renamed),
                    None => out.push_str(ident),
                },
                Segment::Text(text) => out.push_str(text),
            }
        }

        out
    }

    /// `(original, replacement)` pairs in allocation order.
    pub fn into_ident_map(mut self) -> Vec<(String, String)> {
        self.order
            .into_iter()
            .filter_map(|ident| {
                let renamed = self.ident_map.remove(&ident)?;
                Some((ident, renamed))
            })
            .collect()
    }
}
