use tracing::{debug, trace};

use crate::{
    alphabet::Alphabet,
    approve::{ApprovalPolicy, DefaultPolicy},
    candidate_tree::{Candidate, CandidateTree, DEFAULT_MAX_LENGTH},
    error::{AllocError, Result},
    estimator::Occurrences,
};

/// Hands out identifiers that keep the surrounding byte stream as cheap to
/// compress as possible.
///
/// The allocator tracks two pieces of state: the ambient byte statistics of
/// the text the names will be written into, and the frontier of unused
/// candidate names. Every [`generate`](Self::generate) call scores each
/// frontier entry by the estimated information content of the ambient table
/// with that entry added `count` times, returns the cheapest one and grows
/// the frontier in its place.
///
/// ```
/// use mangle_core::TokenAllocator;
///
/// let mut allocator = TokenAllocator::new();
/// allocator.init().unwrap();
///
/// assert_eq!(allocator.generate(1).unwrap(), "$");
/// assert_eq!(allocator.generate(1).unwrap(), "$$");
/// ```
#[derive(Debug)]
pub struct TokenAllocator<P = DefaultPolicy> {
    alphabet: Alphabet,
    policy: P,
    ambience: Occurrences,
    tree: Option<CandidateTree>,
    max_length: usize,
}

impl TokenAllocator<DefaultPolicy> {
    pub fn new() -> Self {
        Self::with_policy(DefaultPolicy)
    }
}

impl Default for TokenAllocator<DefaultPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ApprovalPolicy> TokenAllocator<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            alphabet: Alphabet::default(),
            policy,
            ambience: Occurrences::default(),
            tree: None,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Only takes effect for a tree bootstrapped afterwards.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Bootstraps the candidate tree.
    pub fn init(&mut self) -> Result<()> {
        if self.tree.is_some() {
            return Err(AllocError::AlreadyInitialized);
        }

        let tree = CandidateTree::bootstrap(&self.alphabet, &self.policy, self.max_length);

        debug!(
            alphabet = self.alphabet.len(),
            frontier = tree.len(),
            "candidate tree bootstrapped"
        );

        self.tree = Some(tree);

        Ok(())
    }

    pub fn append_ambience(&mut self, bytes: &[u8], count: u64) {
        self.ambience.add(bytes, count);
    }

    pub fn reset_ambience(&mut self) {
        self.ambience.reset();
    }

    /// Allocates the next identifier.
    ///
    /// `count` is the number of times the caller is going to write the
    /// returned name; it weights the name's bytes both while scoring and when
    /// they are merged into the ambient statistics. A `count` of zero scores
    /// every candidate the same, so the first frontier entry is returned.
    pub fn generate(&mut self, count: u64) -> Result<Candidate> {
        let tree = self.tree.as_mut().ok_or(AllocError::NotInitialized)?;

        let projection = self.ambience.projection();
        let mut best: Option<(f64, &Candidate)> = None;

        for candidate in tree.frontier() {
            let bits = projection.information_content(candidate.as_bytes(), count);

            // strict: the earliest candidate keeps a tie
            if best.map_or(true, |(min, _)| bits < min) {
                best = Some((bits, candidate));
            }
        }

        let (bits, winner) = best.ok_or(AllocError::ExhaustedNamespace)?;
        let winner = winner.clone();

        trace!(candidate = %winner, bits, count, "best candidate");

        self.ambience.add(winner.as_bytes(), count);
        tree.expand(&winner, &self.alphabet, &self.policy)?;

        debug!(
            ident = %winner,
            count,
            frontier = tree.len(),
            "allocated identifier"
        );

        Ok(winner)
    }

    /// `generate(1)` as a `String`.
    pub fn alloc(&mut self) -> Result<String> {
        self.generate(1).map(|c| c.to_string())
    }

    pub fn is_initialized(&self) -> bool {
        self.tree.is_some()
    }

    pub fn ambience(&self) -> &Occurrences {
        &self.ambience
    }

    pub fn frontier(&self) -> Option<&[Candidate]> {
        self.tree.as_ref().map(|tree| tree.frontier())
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}
