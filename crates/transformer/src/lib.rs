#![deny(clippy::all)]

mod collector;
mod filter;
mod replacer;
mod transformer;
mod util;

pub use collector::{tokenize, IdentCollector, Segment};
pub use filter::filter_mangle_candidates;
pub use replacer::IdentReplacer;
pub use transformer::*;
pub use util::{gzip_size, CompressionStats};
