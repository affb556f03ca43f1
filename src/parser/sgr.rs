//! SGR (Select Graphic Rendition) interpreter
//!
//! Applies the parameter body of one `CSI ... m` sequence to a
//! [`TerminalState`]:
//! - Reset (0)
//! - Weight, italic, underline, blink, inverse, conceal, crossed-out (1-9, 21-29)
//! - Primary/alternate fonts (10-19) and fraktur (20)
//! - Standard and bright foreground/background colors (30-37, 40-47, 90-107)
//! - Extended colors - 256-color mode (38;5;n, 48;5;n)
//! - Extended colors - RGB mode (38;2;r;g;b, 48;2;r;g;b)
//! - Default colors (39, 49), frames (51, 52, 54), overline (53, 55)
//!
//! Malformed input never aborts the stream. Every problem is reported as an
//! [`SgrError`], logged, and returned to the caller as a diagnostic.

use crate::core::{Blink, Color, Font, Frame, TerminalState, Underline, Weight};

/// Non-fatal problems found while interpreting an SGR body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SgrError {
    /// A token that is not a decimal integer. Stops the rest of the body.
    #[error("invalid SGR parameter {token:?} at position {position}")]
    InvalidToken { token: String, position: usize },

    #[error("unknown SGR code {0}")]
    UnknownCode(u32),

    /// 38/48 without enough following tokens
    #[error("incomplete extended color after SGR {code}")]
    IncompleteColor { code: u32 },

    #[error("unsupported color encoding {selector} after SGR {code}")]
    UnknownColorEncoding { code: u32, selector: u32 },

    #[error("color value {value} out of range after SGR {code}")]
    ColorOutOfRange { code: u32, value: u32 },
}

impl SgrError {
    /// Whether the remaining tokens of the body are skipped after this error
    pub fn aborts_body(&self) -> bool {
        matches!(self, SgrError::InvalidToken { .. })
    }
}

/// Cursor over the tokens of one SGR body
///
/// Handlers for multi-parameter codes pull their arguments from the same
/// cursor, so consumed arguments are never dispatched as codes.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: std::str::Split<'a, char>,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Tokenize a body. `:` is the separator if it appears anywhere in the
    /// body, otherwise `;`.
    pub fn new(body: &'a str) -> Self {
        let separator = if body.contains(':') { ':' } else { ';' };
        Self {
            tokens: body.split(separator),
            position: 0,
        }
    }

    /// Next token as an integer. An empty token reads as 0.
    pub fn next_code(&mut self) -> Option<Result<u32, SgrError>> {
        let token = self.tokens.next()?;
        let position = self.position;
        self.position += 1;

        if token.is_empty() {
            return Some(Ok(0));
        }
        Some(token.parse::<u32>().map_err(|_| SgrError::InvalidToken {
            token: token.to_string(),
            position,
        }))
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Argument of an extended color code
    fn color_argument(&mut self, code: u32) -> Result<u32, SgrError> {
        self.next_code()
            .unwrap_or(Err(SgrError::IncompleteColor { code }))
    }
}

/// Apply an SGR parameter body to `state` in place.
///
/// Returns the diagnostics encountered; they have already been logged.
pub fn apply(state: &mut TerminalState, body: &str) -> Vec<SgrError> {
    let mut cursor = TokenCursor::new(body);
    let mut diagnostics = Vec::new();

    while let Some(code) = cursor.next_code() {
        let Err(err) = code.and_then(|code| dispatch(state, code, &mut cursor)) else {
            continue;
        };

        let aborts = err.aborts_body();
        if aborts {
            tracing::warn!(body, "{err}; skipping rest of sequence");
        } else {
            tracing::debug!(body, "{err}");
        }
        diagnostics.push(err);
        if aborts {
            break;
        }
    }

    diagnostics
}

/// Return a copy of `state` with `body` applied
pub fn applied(mut state: TerminalState, body: &str) -> TerminalState {
    apply(&mut state, body);
    state
}

/// Apply a single code, pulling extra arguments from `cursor` when needed
fn dispatch(state: &mut TerminalState, code: u32, cursor: &mut TokenCursor<'_>) -> Result<(), SgrError> {
    match code {
        0 => state.reset(),
        1 => state.weight = Weight::Bold,
        2 => state.weight = Weight::Faint,
        3 => state.italic = true,
        4 => state.underline = Underline::Single,
        5 => state.blink = Blink::Slow,
        6 => state.blink = Blink::Rapid,
        7 => state.inverse = true,
        8 => state.conceal = true,
        9 => state.crossed_out = true,
        10 => state.font = Font::Primary,
        11..=19 => state.font = Font::Alternate(small(code - 10)),
        20 => state.fraktur = true,
        21 => state.underline = Underline::Double,
        22 => state.weight = Weight::Normal,
        23 => {
            state.italic = false;
            state.fraktur = false;
        }
        24 => state.underline = Underline::None,
        25 => state.blink = Blink::None,
        27 => state.inverse = false,
        28 => state.conceal = false,
        29 => state.crossed_out = false,
        30..=37 => state.fg = Color::Indexed(small(code - 30)),
        38 => state.fg = extended_color(code, cursor)?,
        39 => state.fg = Color::Default,
        40..=47 => state.bg = Color::Indexed(small(code - 40)),
        48 => state.bg = extended_color(code, cursor)?,
        49 => state.bg = Color::Default,
        51 => state.frame = Frame::Framed,
        52 => state.frame = Frame::Encircled,
        53 => state.overlined = true,
        54 => state.frame = Frame::None,
        55 => state.overlined = false,
        90..=97 => state.fg = Color::Indexed(small(code - 90 + 8)),
        100..=107 => state.bg = Color::Indexed(small(code - 100 + 8)),
        _ => return Err(SgrError::UnknownCode(code)),
    }
    Ok(())
}

/// Decode the arguments of 38/48. All arguments of the chosen encoding are
/// consumed before any of them is validated.
fn extended_color(code: u32, cursor: &mut TokenCursor<'_>) -> Result<Color, SgrError> {
    match cursor.color_argument(code)? {
        5 => {
            let index = cursor.color_argument(code)?;
            Ok(Color::from_index(color_byte(code, index)?))
        }
        2 => {
            let r = cursor.color_argument(code)?;
            let g = cursor.color_argument(code)?;
            let b = cursor.color_argument(code)?;
            Ok(Color::Rgb(
                color_byte(code, r)?,
                color_byte(code, g)?,
                color_byte(code, b)?,
            ))
        }
        selector => Err(SgrError::UnknownColorEncoding { code, selector }),
    }
}

fn color_byte(code: u32, value: u32) -> Result<u8, SgrError> {
    u8::try_from(value).map_err(|_| SgrError::ColorOutOfRange { code, value })
}

/// Offsets computed from the dispatch ranges above always fit in a byte
fn small(offset: u32) -> u8 {
    u8::try_from(offset).unwrap_or(u8::MAX)
}
