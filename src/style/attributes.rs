//! Paintable text attributes
//!
//! What the rendering layer needs to draw a fragment: concrete colors after
//! the theme palette, inverse video and concealment have been applied, plus
//! the decoration flags carried over from the state.

use serde::{Deserialize, Serialize};

use crate::app::ColorPalette;
use crate::core::{Blink, Font, Frame, Rgb, TerminalState, Underline, Weight};

/// Resolved attributes for a style handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextAttributes {
    /// `None` paints with the theme's default foreground
    pub foreground: Option<Rgb>,
    /// `None` paints with the theme's default background
    pub background: Option<Rgb>,
    pub weight: Weight,
    pub italic: bool,
    pub underline: Underline,
    pub blink: Blink,
    pub crossed_out: bool,
    pub overlined: bool,
    pub frame: Frame,
    pub font: Font,
    pub fraktur: bool,
}

impl TextAttributes {
    /// Resolve a rendering state against a palette
    pub fn resolve(state: &TerminalState, palette: &ColorPalette) -> Self {
        let mut foreground = palette.resolve(state.fg);
        let mut background = palette.resolve(state.bg);

        if state.inverse {
            let fg = foreground.unwrap_or(palette.foreground);
            let bg = background.unwrap_or(palette.background);
            foreground = Some(bg);
            background = Some(fg);
        }

        if state.conceal {
            foreground = Some(background.unwrap_or(palette.background));
        }

        Self {
            foreground,
            background,
            weight: state.weight,
            italic: state.italic,
            underline: state.underline,
            blink: state.blink,
            crossed_out: state.crossed_out,
            overlined: state.overlined,
            frame: state.frame,
            font: state.font,
            fraktur: state.fraktur,
        }
    }

    /// Whether painting needs anything beyond the theme defaults
    pub fn is_plain(&self) -> bool {
        *self == Self::resolve(&TerminalState::new(), &ColorPalette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_default_state_is_plain() {
        let attrs = TextAttributes::resolve(&TerminalState::new(), &ColorPalette::default());
        assert_eq!(attrs.foreground, None);
        assert_eq!(attrs.background, None);
        assert!(attrs.is_plain());
    }

    #[test]
    fn test_base_colors_use_palette() {
        let mut palette = ColorPalette::default();
        palette.ansi[1] = Rgb::new(200, 10, 10);
        let state = TerminalState::new().with_fg(Color::RED);
        let attrs = TextAttributes::resolve(&state, &palette);
        assert_eq!(attrs.foreground, Some(Rgb::new(200, 10, 10)));
    }

    #[test]
    fn test_fixed_colors_ignore_palette() {
        let state = TerminalState::new()
            .with_fg(Color::IndexedCube(202))
            .with_bg(Color::Rgb(1, 2, 3));
        let attrs = TextAttributes::resolve(&state, &ColorPalette::default());
        assert_eq!(attrs.foreground, Some(Rgb::new(0xff, 0x5f, 0x00)));
        assert_eq!(attrs.background, Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_inverse_swaps_with_defaults() {
        let palette = ColorPalette::default();
        let mut state = TerminalState::new().with_fg(Color::Rgb(9, 9, 9));
        state.inverse = true;
        let attrs = TextAttributes::resolve(&state, &palette);
        assert_eq!(attrs.foreground, Some(palette.background));
        assert_eq!(attrs.background, Some(Rgb::new(9, 9, 9)));
    }

    #[test]
    fn test_conceal_hides_foreground() {
        let mut state = TerminalState::new()
            .with_fg(Color::Rgb(255, 255, 255))
            .with_bg(Color::Rgb(0, 0, 80));
        state.conceal = true;
        let attrs = TextAttributes::resolve(&state, &ColorPalette::default());
        assert_eq!(attrs.foreground, attrs.background);
    }

    #[test]
    fn test_decorations_carried_over() {
        let mut state = TerminalState::new().with_weight(Weight::Bold);
        state.underline = Underline::Double;
        state.frame = Frame::Encircled;
        let attrs = TextAttributes::resolve(&state, &ColorPalette::default());
        assert_eq!(attrs.weight, Weight::Bold);
        assert_eq!(attrs.underline, Underline::Double);
        assert_eq!(attrs.frame, Frame::Encircled);
        assert!(!attrs.is_plain());
    }
}
