use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

/// Classification of a candidate identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalStatus {
    /// usable as-is
    Ok,
    /// this exact name is forbidden, but longer names starting with it may not be
    Skip,
    /// this name and every extension of it are forbidden
    SkipTree,
}

/// Decides which byte sequences may be handed out as identifiers.
///
/// Implementations must be pure: the same input always yields the same
/// status for the lifetime of an allocator, otherwise the frontier can drift
/// out of sync with the policy.
pub trait ApprovalPolicy {
    fn approve(&self, candidate: &[u8]) -> ApprovalStatus;
}

impl<F> ApprovalPolicy for F
where
    F: Fn(&[u8]) -> ApprovalStatus,
{
    fn approve(&self, candidate: &[u8]) -> ApprovalStatus {
        self(candidate)
    }
}

/// Identifiers may not start with a digit, and `__` prefixed names are left
/// to the host language.
pub fn default_approve(candidate: &[u8]) -> ApprovalStatus {
    match candidate {
        [first, ..] if first.is_ascii_digit() => ApprovalStatus::SkipTree,
        [b'_', b'_', ..] => ApprovalStatus::SkipTree,
        _ => ApprovalStatus::Ok,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl ApprovalPolicy for DefaultPolicy {
    fn approve(&self, candidate: &[u8]) -> ApprovalStatus {
        default_approve(candidate)
    }
}

const ECMASCRIPT_RESERVED_WORDS: &[&str] = &[
    "Infinity", "NaN", "arguments", "await", "break", "case", "catch", "class", "const",
    "continue", "debugger", "default", "delete", "do", "else", "enum", "eval", "export",
    "extends", "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof",
    "undefined", "var", "void", "while", "with", "yield",
];

lazy_static! {
    static ref ECMASCRIPT_RESERVED: FxHashSet<Vec<u8>> = ECMASCRIPT_RESERVED_WORDS
        .iter()
        .map(|word| word.as_bytes().to_vec())
        .collect();
}

/// Blacklist layered over another policy.
///
/// Listed names come back as [`ApprovalStatus::Skip`] so that they are never
/// handed out while their extensions stay available. A `SkipTree` verdict of
/// the inner policy is kept.
#[derive(Debug, Clone, Default)]
pub struct Reserved<P = DefaultPolicy> {
    inner: P,
    names: FxHashSet<Vec<u8>>,
}

impl Reserved<DefaultPolicy> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default policy plus every ECMAScript reserved word and well-known
    /// global that must not be shadowed.
    pub fn ecmascript() -> Self {
        Self {
            inner: DefaultPolicy,
            names: ECMASCRIPT_RESERVED.clone(),
        }
    }
}

impl<P> Reserved<P> {
    pub fn with_policy(inner: P) -> Self {
        Self {
            inner,
            names: FxHashSet::default(),
        }
    }

    pub fn insert(&mut self, name: impl AsRef<[u8]>) {
        self.names.insert(name.as_ref().to_vec());
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        for name in names {
            self.insert(name);
        }
    }

    pub fn contains(&self, name: &[u8]) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<P: ApprovalPolicy> ApprovalPolicy for Reserved<P> {
    fn approve(&self, candidate: &[u8]) -> ApprovalStatus {
        match self.inner.approve(candidate) {
            ApprovalStatus::Ok if self.names.contains(candidate) => ApprovalStatus::Skip,
            status => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod default_policy {
        use super::*;

        #[test]
        fn leading_digit() {
            assert_eq!(default_approve(b"0"), ApprovalStatus::SkipTree);
            assert_eq!(default_approve(b"9abc"), ApprovalStatus::SkipTree);
            assert_eq!(default_approve(b"a9"), ApprovalStatus::Ok);
        }

        #[test]
        fn double_underscore() {
            assert_eq!(default_approve(b"__"), ApprovalStatus::SkipTree);
            assert_eq!(default_approve(b"__proto__"), ApprovalStatus::SkipTree);
            assert_eq!(default_approve(b"_"), ApprovalStatus::Ok);
            assert_eq!(default_approve(b"_a_"), ApprovalStatus::Ok);
        }

        #[test]
        fn plain_names() {
            assert_eq!(DefaultPolicy.approve(b"$"), ApprovalStatus::Ok);
            assert_eq!(DefaultPolicy.approve(b"foo"), ApprovalStatus::Ok);
        }
    }

    mod reserved {
        use super::*;

        #[test]
        fn skips_exact_names_only() {
            let mut policy = Reserved::new();
            policy.insert("do");

            assert_eq!(policy.approve(b"do"), ApprovalStatus::Skip);
            assert_eq!(policy.approve(b"dom"), ApprovalStatus::Ok);
            assert_eq!(policy.approve(b"d"), ApprovalStatus::Ok);
        }

        #[test]
        fn keeps_inner_skip_tree() {
            let mut policy = Reserved::new();
            policy.insert("1a");

            assert_eq!(policy.approve(b"1a"), ApprovalStatus::SkipTree);
        }

        #[test]
        fn ecmascript_words() {
            let policy = Reserved::ecmascript();

            for word in ["in", "if", "do", "var", "let", "new", "try", "NaN"] {
                assert_eq!(policy.approve(word.as_bytes()), ApprovalStatus::Skip, "{word}");
            }
            assert_eq!(policy.approve(b"inx"), ApprovalStatus::Ok);
        }

        #[test]
        fn wraps_closures() {
            let mut policy = Reserved::with_policy(|c: &[u8]| {
                if c.contains(&b'$') {
                    ApprovalStatus::SkipTree
                } else {
                    ApprovalStatus::Ok
                }
            });
            policy.extend(["a", "b"]);

            assert_eq!(policy.len(), 2);
            assert!(policy.contains(b"a"));
            assert_eq!(policy.approve(b"a"), ApprovalStatus::Skip);
            assert_eq!(policy.approve(b"a$"), ApprovalStatus::SkipTree);
            assert_eq!(policy.approve(b"c"), ApprovalStatus::Ok);
        }
    }
}
