//! Streaming parser
//!
//! The automaton that turns a byte stream into key/value pairs. State lives
//! in a handful of flags plus the two accumulation buffers, all local to a
//! single call; nothing is shared between parses and nothing survives a
//! return.

use std::mem;

use crate::error::{ParamError, Result};
use crate::map::Pair;

use super::sink::PairSink;
use super::source::ByteSource;

/// Lexical state for one in-progress parse call
#[derive(Debug, Default)]
struct ParseState {
    /// Between an opening and closing double quote
    inside_quote: bool,
    /// The previous byte was a backslash; next byte passes through verbatim
    next_verbatim: bool,
    /// A colon has been seen; the next quoted string is a value
    awaiting_value: bool,
    /// Between a `#` and the next newline
    in_comment: bool,
    /// Accumulates the key of the pair under construction
    key: Vec<u8>,
    /// Accumulates the value of the pair under construction
    value: Vec<u8>,
    /// Completed pairs so far
    produced: usize,
}

/// Parse key/value pairs from a byte source
///
/// `expected_count == 0` accepts however many complete pairs appear before
/// the source ends. `expected_count > 0` stops consuming as soon as that
/// many pairs have been produced, leaving any remaining bytes in the source.
///
/// All-or-nothing: on any error the pairs produced so far are discarded.
pub fn parse<S: ByteSource>(source: &mut S, expected_count: u16) -> Result<Vec<Pair>> {
    let expected = expected_count as usize;
    let mut state = ParseState::default();
    let mut pairs: Vec<Pair> = Vec::new();

    while let Some(byte) = source.next_byte()? {
        // Comment swallows everything up to the newline. The newline also
        // clears awaiting_value: an unterminated comment line acts as an
        // implicit pair terminator.
        if state.in_comment {
            if byte == b'\n' {
                state.in_comment = false;
                state.awaiting_value = false;
            }
            continue;
        }

        if state.next_verbatim {
            // Escaped byte: falls through to the accumulation step below
            // with no lexical meaning of its own.
            state.next_verbatim = false;
        } else {
            match byte {
                b'\\' => {
                    state.next_verbatim = true;
                    continue;
                }

                b'#' if !state.inside_quote => {
                    state.in_comment = true;
                    continue;
                }

                b'"' => {
                    if !state.inside_quote {
                        state.inside_quote = true;
                    } else {
                        state.inside_quote = false;
                        if state.awaiting_value {
                            // Closing quote of a value completes the pair.
                            pairs.push(Pair {
                                key: mem::take(&mut state.key),
                                value: mem::take(&mut state.value),
                            });
                            state.awaiting_value = false;
                            state.produced += 1;
                            if expected > 0 && state.produced >= expected {
                                break;
                            }
                        }
                    }
                    continue;
                }

                b'\n' => {
                    if state.inside_quote {
                        return Err(ParamError::UnterminatedQuote);
                    }
                    if state.next_verbatim {
                        // Unreachable via the escape branch above; kept as a
                        // guard against the flag leaking through a refactor.
                        return Err(ParamError::DanglingEscape);
                    }
                    // Missing comma before the line break; forgiven as an
                    // implicit separator.
                    state.awaiting_value = false;
                    continue;
                }

                _ if !state.inside_quote => {
                    match byte {
                        b':' => {
                            if state.awaiting_value {
                                return Err(ParamError::MissingComma);
                            }
                            state.awaiting_value = true;
                        }
                        b',' => {
                            if !state.awaiting_value {
                                return Err(ParamError::MissingColon);
                            }
                            state.awaiting_value = false;
                        }
                        b'{' | b'}' | b' ' | b'\t' => {}
                        other => {
                            return Err(ParamError::Format(format!(
                                "unexpected byte 0x{:02x} outside quotes",
                                other
                            )));
                        }
                    }
                    continue;
                }

                // Any other byte inside quotes accumulates below.
                _ => {}
            }
        }

        if state.inside_quote {
            if state.awaiting_value {
                state.value.push(byte);
            } else {
                state.key.push(byte);
            }
        }
    }

    // End-of-source inside a quoted string or mid-escape means the stream
    // was cut; so does falling short of a nonzero expected count.
    if state.inside_quote || state.next_verbatim || (expected > 0 && state.produced < expected) {
        return Err(ParamError::Truncated);
    }

    tracing::debug!(pairs = pairs.len(), "stream parse complete");
    Ok(pairs)
}

/// Parse key/value pairs and deliver them into a sink
///
/// The sink sees pairs only after the whole parse has succeeded, so a parse
/// failure never leaves it partially filled. A sink refusal surfaces as
/// `AllocationFailure` and stops delivery.
pub fn parse_into<S, K>(source: &mut S, sink: &mut K, expected_count: u16) -> Result<usize>
where
    S: ByteSource,
    K: PairSink,
{
    let pairs = parse(source, expected_count)?;
    let count = pairs.len();
    for pair in pairs {
        sink.accept(pair.key, pair.value).map_err(|e| match e {
            refusal @ ParamError::AllocationFailure(_) => refusal,
            other => ParamError::AllocationFailure(other.to_string()),
        })?;
    }
    Ok(count)
}
