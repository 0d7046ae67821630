//! Entropy-guided identifier allocation.
//!
//! [`TokenAllocator`] picks replacement names for a mangler so that the text
//! they are written into stays as compressible as possible: each candidate is
//! scored by the order-0 information content of the ambient byte statistics
//! with the candidate added, and the cheapest one wins.

mod alphabet;
mod approve;
mod candidate_tree;
mod error;
mod estimator;
mod token_allocator;

pub use alphabet::{Alphabet, DEFAULT_ORDER};
pub use approve::{default_approve, ApprovalPolicy, ApprovalStatus, DefaultPolicy, Reserved};
pub use candidate_tree::{Candidate, CandidateTree, DEFAULT_MAX_LENGTH};
pub use error::{AllocError, Result};
pub use estimator::{estimate, Occurrences, Projection, BUCKETS};
pub use token_allocator::TokenAllocator;
