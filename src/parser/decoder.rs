//! Escape sequence splitter
//!
//! Splits a text stream into literal runs and control sequences, interprets
//! SGR sequences and emits one [`TextFragment`] per run of literal text.
//!
//! # Sequence handling
//!
//! - `ESC [ params m` is SGR and its whole body goes to the interpreter,
//!   which stops at the first token that is not a number.
//! - Cursor movement, erase and private mode sequences are dropped from the
//!   output.
//! - Sequences with no literal text between them are coalesced into one
//!   update, so `ESC[1mESC[31mText` yields a single bold red fragment.
//! - A CSI interrupted by a byte outside the CSI grammar is released as
//!   literal text.
//! - A sequence cut off at the end of a chunk is held back and completed by
//!   the next call to [`Decoder::feed`].

use std::borrow::Cow;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::fragment::{StreamTag, TextFragment};
use super::sgr;
use crate::core::TerminalState;

const ESC: u8 = 0x1b;

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Longest unterminated sequence carried over to the next chunk. Longer
    /// tails are released as literal text.
    pub max_pending_bytes: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_pending_bytes: 1024,
        }
    }
}

/// Result of scanning a control sequence starting at an ESC byte
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scan {
    /// ESC not followed by `[`
    NotCsi,
    /// Input ends before the sequence is decided
    Incomplete,
    /// SGR sequence; `params` is the body
    Sgr { params: Range<usize>, end: usize },
    /// Some other complete CSI sequence
    Other { final_byte: u8, end: usize },
    /// A byte outside the CSI grammar at `end`
    Malformed { end: usize },
}

/// Outcome of searching forward for the `m` that closes an SGR body
enum Lookahead {
    Found(usize),
    Blocked,
    Exhausted,
}

/// Scan the CSI sequence whose ESC is at `esc`
///
/// A sequence closed by `m` is SGR whatever its parameter text holds, so a
/// bad token reaches the interpreter instead of splitting the sequence.
/// When a different final byte turns up first, the sequence is only taken
/// as a non-SGR command if it has the shape of one (see
/// [`is_control_function`]); otherwise the scan continues through printable
/// ASCII for an `m`. `at_eof` marks the end of the stream, where a search
/// that runs out of input falls back to the grammar.
fn scan_csi(bytes: &[u8], esc: usize, at_eof: bool) -> Scan {
    match bytes.get(esc + 1) {
        None => return Scan::Incomplete,
        Some(b'[') => {}
        Some(_) => return Scan::NotCsi,
    }

    let params_start = esc + 2;
    let mut i = params_start;
    while matches!(bytes.get(i), Some(0x30..=0x3F)) {
        i += 1;
    }
    let params_end = i;
    while matches!(bytes.get(i), Some(0x20..=0x2F)) {
        i += 1;
    }

    let fallback = match bytes.get(i) {
        None => return Scan::Incomplete,
        Some(b'm') => {
            return Scan::Sgr {
                params: params_start..i,
                end: i + 1,
            }
        }
        Some(&final_byte) if (0x40..=0x7E).contains(&final_byte) => {
            let other = Scan::Other {
                final_byte,
                end: i + 1,
            };
            if is_control_function(&bytes[params_start..params_end], final_byte) {
                return other;
            }
            other
        }
        Some(_) => Scan::Malformed { end: i },
    };

    match find_terminator(bytes, i) {
        Lookahead::Found(m) => Scan::Sgr {
            params: params_start..m,
            end: m + 1,
        },
        Lookahead::Exhausted if !at_eof => Scan::Incomplete,
        Lookahead::Exhausted | Lookahead::Blocked => fallback,
    }
}

/// Shapes of the cursor, erase and mode commands that show up in process
/// output: an upper-case final byte, no parameters, or a private marker
/// such as `?25l`.
fn is_control_function(params: &[u8], final_byte: u8) -> bool {
    matches!(final_byte, b'@'..=b'Z' | b'`')
        || params.is_empty()
        || matches!(params.first(), Some(b'<'..=b'?'))
}

fn find_terminator(bytes: &[u8], from: usize) -> Lookahead {
    for (offset, &byte) in bytes[from..].iter().enumerate() {
        match byte {
            b'm' => return Lookahead::Found(from + offset),
            b if b.is_ascii_graphic() => {}
            _ => return Lookahead::Blocked,
        }
    }
    Lookahead::Exhausted
}

/// Collects literal text and pending SGR bodies for one call to `feed`
struct Emitter<'s, 'a> {
    state: &'s mut TerminalState,
    stream: StreamTag,
    text: String,
    unit: Vec<&'a str>,
    fragments: Vec<TextFragment>,
}

impl<'s, 'a> Emitter<'s, 'a> {
    fn new(state: &'s mut TerminalState, stream: StreamTag) -> Self {
        Self {
            state,
            stream,
            text: String::new(),
            unit: Vec::new(),
            fragments: Vec::new(),
        }
    }

    fn literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.unit.is_empty() {
            self.flush();
        }
        self.text.push_str(text);
    }

    fn sgr(&mut self, body: &'a str) {
        self.unit.push(body);
    }

    /// Emit the collected text in the current state, then apply the
    /// collected sequences as one update
    fn flush(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.fragments
                .push(TextFragment::new(text, *self.state, self.stream));
        }
        for body in self.unit.drain(..) {
            sgr::apply(self.state, body);
        }
    }

    fn finish(mut self) -> Vec<TextFragment> {
        self.flush();
        self.fragments
    }
}

/// Streaming SGR decoder for a single stream
///
/// Owns the running [`TerminalState`]. Feed chunks in order from one
/// thread; use one decoder per stream.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: TerminalState,
    /// Unterminated sequence held back from the previous chunk
    pending: String,
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder in the default state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The state that applies to the next literal text
    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    /// Bytes of an unterminated sequence waiting for the next chunk
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Forget the running state and any held-back bytes
    pub fn reset(&mut self) {
        self.state.reset();
        self.pending.clear();
    }

    /// Decode a chunk of stream text
    pub fn feed(&mut self, text: &str, stream: StreamTag) -> impl Iterator<Item = TextFragment> {
        let input: Cow<'_, str> = if self.pending.is_empty() {
            Cow::Borrowed(text)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.push_str(text);
            Cow::Owned(joined)
        };

        let mut emitter = Emitter::new(&mut self.state, stream);
        let tail = decode(&input, &mut emitter, Some(self.config.max_pending_bytes));
        let fragments = emitter.finish();

        if let Some(tail) = tail {
            self.pending = input[tail..].to_string();
        }
        fragments.into_iter()
    }

    /// End of stream: decode held-back bytes for good. A sequence that is
    /// still unterminated is released as literal text.
    pub fn finish(&mut self, stream: StreamTag) -> impl Iterator<Item = TextFragment> {
        let pending = std::mem::take(&mut self.pending);
        let mut emitter = Emitter::new(&mut self.state, stream);
        decode(&pending, &mut emitter, None);
        emitter.finish().into_iter()
    }
}

/// Split `input` into the emitter. Returns the start of an unterminated
/// trailing sequence, if one is held back.
///
/// `max_pending` is `None` at the end of the stream, where nothing is held.
fn decode<'a>(
    input: &'a str,
    emitter: &mut Emitter<'_, 'a>,
    max_pending: Option<usize>,
) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(offset) = bytes[pos..].iter().position(|&b| b == ESC) else {
            emitter.literal(&input[pos..]);
            break;
        };
        let esc = pos + offset;
        emitter.literal(&input[pos..esc]);

        let mut scan = scan_csi(bytes, esc, max_pending.is_none());
        if let (true, Some(max_pending)) = (scan == Scan::Incomplete, max_pending) {
            let tail = bytes.len() - esc;
            if tail <= max_pending {
                return Some(esc);
            }
            tracing::warn!(
                tail,
                max_pending,
                "unterminated escape sequence too long, not waiting for more input"
            );
            scan = scan_csi(bytes, esc, true);
        }

        match scan {
            Scan::NotCsi => {
                emitter.literal(&input[esc..esc + 1]);
                pos = esc + 1;
            }
            Scan::Incomplete => {
                emitter.literal(&input[esc..]);
                break;
            }
            Scan::Sgr { params, end } => {
                emitter.sgr(&input[params]);
                pos = end;
            }
            Scan::Other { final_byte, end } => {
                tracing::trace!(
                    sequence = ?&input[esc + 1..end],
                    final_byte = %(final_byte as char),
                    "ignoring non-SGR control sequence"
                );
                pos = end;
            }
            Scan::Malformed { end } => {
                tracing::debug!(sequence = ?&input[esc + 1..end], "malformed control sequence");
                emitter.literal(&input[esc..end]);
                pos = end;
            }
        }
    }

    None
}
