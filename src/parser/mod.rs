//! SGR escape sequence decoding
//!
//! Turns a stream of process output into text fragments tagged with the
//! rendering state selected by the SGR sequences embedded in it.

mod decoder;
mod fragment;
pub mod sgr;

pub use decoder::{Decoder, DecoderConfig};
pub use fragment::{StreamTag, TextFragment};
pub use sgr::{SgrError, TokenCursor};
