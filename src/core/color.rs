//! Color representation for SGR foreground and background
//!
//! Supports:
//! - Default foreground/background
//! - 16 standard ANSI colors (0-15), resolved later against a theme
//! - 6x6x6 color cube (16-231) and grayscale ramp (232-255), fixed RGB
//! - 24-bit true color (RGB)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Intensity steps of the 6x6x6 color cube
pub const CUBE_RAMP: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

/// Luminance of the 24 grayscale entries (indices 232-255)
pub const GRAY_RAMP: [u8; 24] = [
    0x08, 0x12, 0x1c, 0x26, 0x30, 0x3a, 0x44, 0x4e, 0x58, 0x62, 0x6c, 0x76, 0x80, 0x8a, 0x94, 0x9e,
    0xa8, 0xb2, 0xbc, 0xc6, 0xd0, 0xda, 0xe4, 0xee,
];

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color as selected by SGR codes
///
/// The indexed variants partition 0..=255: use [`Color::from_index`] to
/// build one from a raw palette index so the ranges stay consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// Standard 16-color palette (0-15), theme dependent
    Indexed(u8),
    /// 6x6x6 color cube (16-231)
    IndexedCube(u8),
    /// Grayscale ramp (232-255)
    IndexedGray(u8),
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Standard ANSI colors (0-7)
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    /// Bright ANSI colors (8-15)
    pub const BRIGHT_BLACK: Color = Color::Indexed(8);
    pub const BRIGHT_RED: Color = Color::Indexed(9);
    pub const BRIGHT_GREEN: Color = Color::Indexed(10);
    pub const BRIGHT_YELLOW: Color = Color::Indexed(11);
    pub const BRIGHT_BLUE: Color = Color::Indexed(12);
    pub const BRIGHT_MAGENTA: Color = Color::Indexed(13);
    pub const BRIGHT_CYAN: Color = Color::Indexed(14);
    pub const BRIGHT_WHITE: Color = Color::Indexed(15);

    /// Classify a 256-color palette index
    pub fn from_index(index: u8) -> Self {
        match index {
            0..=15 => Color::Indexed(index),
            16..=231 => Color::IndexedCube(index),
            232..=255 => Color::IndexedGray(index),
        }
    }

    /// The 256-color palette index, if this is an indexed color
    pub fn index(&self) -> Option<u8> {
        match *self {
            Color::Indexed(i) | Color::IndexedCube(i) | Color::IndexedGray(i) => Some(i),
            Color::Default | Color::Rgb(..) => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }

    /// RGB value that does not depend on a theme.
    ///
    /// `Default` and the 16 base colors return `None`.
    pub fn fixed_rgb(&self) -> Option<Rgb> {
        match *self {
            Color::Default | Color::Indexed(_) => None,
            Color::IndexedCube(i) => Some(cube_to_rgb(i)),
            Color::IndexedGray(i) => Some(gray_to_rgb(i)),
            Color::Rgb(r, g, b) => Some(Rgb::new(r, g, b)),
        }
    }
}

/// RGB of a color cube entry. Indices outside 16..=231 are clamped into it.
pub fn cube_to_rgb(index: u8) -> Rgb {
    let n = usize::from(index.clamp(16, 231) - 16);
    Rgb::new(
        CUBE_RAMP[(n / 36) % 6],
        CUBE_RAMP[(n / 6) % 6],
        CUBE_RAMP[n % 6],
    )
}

/// RGB of a grayscale entry. Indices below 232 are clamped to the first step.
pub fn gray_to_rgb(index: u8) -> Rgb {
    let gray = GRAY_RAMP[usize::from(index.max(232) - 232)];
    Rgb::new(gray, gray, gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default(), Color::Default);
        assert!(Color::Default.is_default());
        assert_eq!(Color::Default.index(), None);
    }

    #[test]
    fn test_from_index_ranges() {
        assert_eq!(Color::from_index(0), Color::Indexed(0));
        assert_eq!(Color::from_index(15), Color::Indexed(15));
        assert_eq!(Color::from_index(16), Color::IndexedCube(16));
        assert_eq!(Color::from_index(231), Color::IndexedCube(231));
        assert_eq!(Color::from_index(232), Color::IndexedGray(232));
        assert_eq!(Color::from_index(255), Color::IndexedGray(255));
    }

    #[test]
    fn test_base_colors_have_no_fixed_rgb() {
        assert_eq!(Color::RED.fixed_rgb(), None);
        assert_eq!(Color::BRIGHT_WHITE.fixed_rgb(), None);
        assert_eq!(Color::Default.fixed_rgb(), None);
    }

    #[test]
    fn test_color_cube_to_rgb() {
        assert_eq!(cube_to_rgb(16), Rgb::new(0, 0, 0));
        assert_eq!(cube_to_rgb(196), Rgb::new(0xff, 0, 0));
        assert_eq!(cube_to_rgb(202), Rgb::new(0xff, 0x5f, 0x00));
        assert_eq!(cube_to_rgb(231), Rgb::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn test_grayscale_to_rgb() {
        assert_eq!(gray_to_rgb(232), Rgb::new(8, 8, 8));
        assert_eq!(gray_to_rgb(244), Rgb::new(128, 128, 128));
        assert_eq!(gray_to_rgb(255), Rgb::new(238, 238, 238));
    }

    #[test]
    fn test_rgb_passthrough() {
        assert_eq!(Color::Rgb(10, 20, 30).fixed_rgb(), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(255, 95, 0).to_string(), "#ff5f00");
    }
}
