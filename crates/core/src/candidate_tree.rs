use std::fmt;

use tracing::{trace, warn};

use crate::{
    alphabet::Alphabet,
    approve::{ApprovalPolicy, ApprovalStatus},
    error::{AllocError, Result},
};

/// Longest identifier the tree will ever generate.
pub const DEFAULT_MAX_LENGTH: usize = 64;

/// An identifier that has not been handed out yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Candidate(Vec<u8>);

impl Candidate {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn child(&self, byte: u8) -> Self {
        let mut bytes = Vec::with_capacity(self.0.len() + 1);
        bytes.extend_from_slice(&self.0);
        bytes.push(byte);
        Self(bytes)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl AsRef<[u8]> for Candidate {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Candidate {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl PartialEq<&str> for Candidate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// Frontier of the implicit trie of identifiers.
///
/// Only approved, never-allocated names live here. The frontier keeps the
/// order in which expansion produced its entries; scoring walks it front to
/// back and keeps the first minimum, so this order is the tie-break.
#[derive(Debug, Clone)]
pub struct CandidateTree {
    frontier: Vec<Candidate>,
    max_length: usize,
}

impl CandidateTree {
    /// Expands the empty name so the empty sequence itself is never exposed.
    pub fn bootstrap<P>(alphabet: &Alphabet, policy: &P, max_length: usize) -> Self
    where
        P: ApprovalPolicy + ?Sized,
    {
        let mut tree = Self {
            frontier: vec![Candidate::default()],
            max_length: max_length.max(1),
        };

        tree.expand_at(0, alphabet, policy);

        tree
    }

    /// Replaces `candidate` with its approved descendants.
    pub fn expand<P>(&mut self, candidate: &Candidate, alphabet: &Alphabet, policy: &P) -> Result<()>
    where
        P: ApprovalPolicy + ?Sized,
    {
        let index = self
            .frontier
            .iter()
            .position(|c| c == candidate)
            .ok_or_else(|| AllocError::InvariantViolation {
                candidate: candidate.clone(),
            })?;

        self.expand_at(index, alphabet, policy);

        Ok(())
    }

    fn expand_at<P>(&mut self, index: usize, alphabet: &Alphabet, policy: &P)
    where
        P: ApprovalPolicy + ?Sized,
    {
        let parent = &self.frontier[index];
        let mut children = Vec::with_capacity(alphabet.len());

        self.grow(parent, alphabet, policy, &mut children);

        trace!(parent = %parent, children = children.len(), "expand candidate");

        self.frontier.splice(index..=index, children);
    }

    fn grow<P>(&self, parent: &Candidate, alphabet: &Alphabet, policy: &P, out: &mut Vec<Candidate>)
    where
        P: ApprovalPolicy + ?Sized,
    {
        if parent.len() >= self.max_length {
            warn!(
                candidate = %parent,
                max_length = self.max_length,
                "identifier length limit reached, subtree dropped"
            );
            return;
        }

        for byte in alphabet.iter() {
            let child = parent.child(byte);

            match policy.approve(child.as_bytes()) {
                ApprovalStatus::SkipTree => {}
                ApprovalStatus::Ok => out.push(child),
                // the name itself is unusable, offer its children in its place
                ApprovalStatus::Skip => self.grow(&child, alphabet, policy, out),
            }
        }
    }

    pub fn frontier(&self) -> &[Candidate] {
        &self.frontier
    }

    pub fn contains(&self, candidate: &[u8]) -> bool {
        self.frontier.iter().any(|c| c.as_bytes() == candidate)
    }

    pub fn len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}
