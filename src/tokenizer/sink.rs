//! Pair sinks
//!
//! Completed key/value pairs leave the tokenizer through `PairSink`. The
//! sink decides what a pair becomes (an entry in a `ParamMap`, an element
//! of a `Vec<Pair>`, a line on a terminal) without the tokenizer knowing.

use crate::error::Result;

/// Accepts completed key/value pairs in production order
pub trait PairSink {
    /// Take ownership of one completed pair
    ///
    /// Returning an error aborts delivery; the tokenizer reports it to the
    /// caller as `AllocationFailure`.
    fn accept(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;
}
