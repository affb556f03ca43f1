//! Canonical SGR serialization
//!
//! Re-encodes a [`TerminalState`] as the shortest SGR body that rebuilds it
//! from the default state. The output depends only on the attribute values,
//! never on the codes that produced them, so it doubles as an equality and
//! cache key.
//!
//! Layout: `0` first, then each non-default attribute in a fixed order
//! (font, weight, underline, blink, inverse, background, foreground, italic,
//! conceal, crossed-out, fraktur, frame, overline). Colors always use the
//! extended forms `38;5;n` / `38;2;r;g;b` (and `48;…`). The font code is
//! written once.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::core::{Blink, Color, Font, Frame, TerminalState, Underline, Weight};
use crate::parser::sgr;

/// Canonical SGR body of a rendering state
///
/// Deserializing goes through [`CanonicalKey::normalize`], so a key read
/// from JSON is canonical even if the text was not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Key of the default state
    pub const DEFAULT: &'static str = "0";

    /// Serialize a state
    pub fn of(state: &TerminalState) -> Self {
        let mut out = String::from(Self::DEFAULT);
        write_state(&mut out, state);
        Self(out)
    }

    /// Canonicalize an arbitrary SGR body
    pub fn normalize(body: &str) -> Self {
        Self::of(&sgr::applied(TerminalState::new(), body))
    }

    /// The state this key describes
    pub fn to_state(&self) -> TerminalState {
        sgr::applied(TerminalState::new(), &self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl From<&TerminalState> for CanonicalKey {
    fn from(state: &TerminalState) -> Self {
        Self::of(state)
    }
}

impl From<String> for CanonicalKey {
    fn from(body: String) -> Self {
        Self::normalize(&body)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn write_state(out: &mut String, state: &TerminalState) {
    if let Font::Alternate(n) = state.font {
        push_code(out, 10 + u32::from(n));
    }
    match state.weight {
        Weight::Bold => push_code(out, 1),
        Weight::Faint => push_code(out, 2),
        Weight::Normal => {}
    }
    match state.underline {
        Underline::Single => push_code(out, 4),
        Underline::Double => push_code(out, 21),
        Underline::None => {}
    }
    match state.blink {
        Blink::Slow => push_code(out, 5),
        Blink::Rapid => push_code(out, 6),
        Blink::None => {}
    }
    if state.inverse {
        push_code(out, 7);
    }
    push_color(out, 48, state.bg);
    push_color(out, 38, state.fg);
    if state.italic {
        push_code(out, 3);
    }
    if state.conceal {
        push_code(out, 8);
    }
    if state.crossed_out {
        push_code(out, 9);
    }
    if state.fraktur {
        push_code(out, 20);
    }
    match state.frame {
        Frame::Framed => push_code(out, 51),
        Frame::Encircled => push_code(out, 52),
        Frame::None => {}
    }
    if state.overlined {
        push_code(out, 53);
    }
}

fn push_code(out: &mut String, code: u32) {
    // Writing into a String cannot fail
    let _ = write!(out, ";{code}");
}

fn push_color(out: &mut String, code: u32, color: Color) {
    if let Some(index) = color.index() {
        debug_assert_eq!(
            Color::from_index(index),
            color,
            "indexed color outside its palette range"
        );
    }
    let _ = match color {
        Color::Default => Ok(()),
        Color::Indexed(i) | Color::IndexedCube(i) | Color::IndexedGray(i) => {
            write!(out, ";{code};5;{i}")
        }
        Color::Rgb(r, g, b) => write!(out, ";{code};2;{r};{g};{b}"),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(body: &str) -> String {
        CanonicalKey::normalize(body).as_str().to_string()
    }

    #[test]
    fn test_default_key() {
        let key = CanonicalKey::of(&TerminalState::new());
        assert_eq!(key.as_str(), "0");
        assert!(key.is_default());
    }

    #[test]
    fn test_key_independent_of_order() {
        assert_eq!(key_of("31;1"), key_of("1;31"));
        assert_eq!(key_of("4;3;38;5;1"), key_of("3;31;4"));
        assert_eq!(key_of("1;0;1"), key_of("1"));
        assert_eq!(key_of("2;1"), key_of("1"));
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(key_of("1;31"), "0;1;38;5;1");
        assert_eq!(key_of("44;38;2;1;2;3"), "0;48;5;4;38;2;1;2;3");
        assert_eq!(key_of("53;52;20;9;8;3"), "0;3;8;9;20;52;53");
        assert_eq!(key_of("7;6;21;2;12"), "0;12;2;21;6;7");
    }

    #[test]
    fn test_font_written_once() {
        assert_eq!(key_of("13;4"), "0;13;4");
        let key = CanonicalKey::normalize("19;1;4");
        let fonts = key.as_str().split(';').filter(|t| *t == "19").count();
        assert_eq!(fonts, 1);
    }

    #[test]
    fn test_reset_codes_vanish() {
        assert_eq!(key_of("1;22;4;24;39;49"), "0");
    }

    #[test]
    fn test_key_round_trip() {
        let mut state = TerminalState::new()
            .with_fg(Color::IndexedGray(240))
            .with_bg(Color::Rgb(9, 8, 7))
            .with_weight(Weight::Faint);
        state.font = Font::Alternate(4);
        state.underline = Underline::Double;
        state.blink = Blink::Rapid;
        state.inverse = true;
        state.italic = true;
        state.fraktur = true;
        state.frame = Frame::Framed;
        state.overlined = true;

        let key = CanonicalKey::of(&state);
        assert_eq!(key.to_state(), state);
    }

    #[test]
    fn test_key_serialization() {
        let key = CanonicalKey::normalize("1");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"0;1\"");
    }

    #[test]
    fn test_deserialized_key_is_canonical() {
        let key: CanonicalKey = serde_json::from_str("\"1;31\"").unwrap();
        assert_eq!(key, CanonicalKey::normalize("31;1"));
        assert_eq!(key.as_str(), "0;1;38;5;1");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "indexed color outside its palette range")]
    fn test_misclassified_index_rejected() {
        CanonicalKey::of(&TerminalState::new().with_fg(Color::Indexed(200)));
    }
}
