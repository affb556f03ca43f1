//! Rendering state model
//!
//! Platform-independent value types describing how text should be drawn:
//! - Colors selected by SGR codes, with the fixed 256-color tables
//! - The accumulated terminal rendering state
//!
//! Everything here is a plain value with structural equality, so equal
//! states compare and hash equal no matter how they were reached.

mod color;
mod state;

pub use color::{cube_to_rgb, gray_to_rgb, Color, Rgb, CUBE_RAMP, GRAY_RAMP};
pub use state::{Blink, Font, Frame, TerminalState, Underline, Weight};
