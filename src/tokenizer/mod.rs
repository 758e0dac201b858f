//! Stream Tokenizer Module
//!
//! Byte-at-a-time decoder for a restricted flat key/value text format.
//! No lookahead, no reassembly buffer: every byte is classified into one of
//! a handful of lexical states as it arrives, so the input can stream from
//! a file or a network response of unknown length.
//!
//! ## Accepted Grammar (informal)
//! ```text
//! object   ::= '{' pair (',' pair)* '}'
//! pair     ::= quoted ':' quoted
//! quoted   ::= '"' (escaped-char | plain-char)* '"'
//! comment  ::= '#' any-char-except-newline* '\n'
//! ```
//!
//! Whitespace (space, tab) and braces are ignored outside quotes. A newline
//! outside a quote and outside a comment has no grammatical role, but if a
//! value was still pending it is forgiven as an implicit separator rather
//! than rejected. Nesting, numbers, arrays, and unicode escapes are out of
//! scope.

mod parser;
mod sink;
mod source;

pub use parser::{parse, parse_into};
pub use sink::PairSink;
pub use source::{ByteSource, LimitedSource, ReaderSource, SliceSource};
