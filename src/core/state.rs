//! Terminal rendering state
//!
//! The accumulated effect of every SGR code seen so far on a stream. Each
//! dimension holds exactly one of its variants; `reset` restores all of
//! them at once.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Font selection (SGR 10-19)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    #[default]
    Primary,
    /// Alternate font 1-9 (SGR 11-19)
    Alternate(u8),
}

/// Font weight (SGR 1, 2, 22)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weight {
    Faint,
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Blink {
    #[default]
    None,
    Slow,
    Rapid,
}

/// Frame decoration (SGR 51, 52, 54)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    #[default]
    None,
    Framed,
    Encircled,
}

/// Rendering state in effect for a run of text
///
/// A plain value: decoders own one and update it in place, fragments carry
/// copies of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalState {
    pub font: Font,
    pub weight: Weight,
    pub underline: Underline,
    pub blink: Blink,
    pub italic: bool,
    pub inverse: bool,
    pub conceal: bool,
    pub crossed_out: bool,
    pub fraktur: bool,
    pub overlined: bool,
    pub frame: Frame,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
}

impl TerminalState {
    /// The all-defaults state a stream starts in
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every dimension to its default (SGR 0)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check whether no attribute differs from the default
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default() {
        let state = TerminalState::new();
        assert!(state.is_default());
        assert_eq!(state.font, Font::Primary);
        assert_eq!(state.weight, Weight::Normal);
        assert_eq!(state.fg, Color::Default);
        assert_eq!(state.bg, Color::Default);
    }

    #[test]
    fn test_state_reset() {
        let mut state = TerminalState::new()
            .with_fg(Color::RED)
            .with_weight(Weight::Bold);
        state.italic = true;
        state.frame = Frame::Encircled;
        assert!(!state.is_default());

        state.reset();
        assert!(state.is_default());
    }

    #[test]
    fn test_state_equality_is_structural() {
        let a = TerminalState::new().with_bg(Color::Rgb(1, 2, 3));
        let mut b = TerminalState::new();
        b.bg = Color::Rgb(1, 2, 3);
        assert_eq!(a, b);
    }
}
