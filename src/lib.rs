//! SGR Console Styling Library
//!
//! Decodes ANSI "Select Graphic Rendition" escape sequences in captured
//! process output into plain-text fragments tagged with their rendering
//! state, and deduplicates equal states into shared style handles.
//!
//! - `core`: Colors and the terminal rendering state
//! - `parser`: Escape sequence splitter and SGR interpreter
//! - `style`: Canonical state keys, resolved attributes, style registry
//! - `output`: Decoder + registry pipeline delivering styled text
//! - `app`: Configuration and logging setup
//!
//! ```
//! use std::sync::Arc;
//! use sgr_console::output::StyledOutput;
//! use sgr_console::parser::StreamTag;
//! use sgr_console::style::{StyleHandle, StyleRegistry};
//!
//! let registry = Arc::new(StyleRegistry::new());
//! let mut stdout = StyledOutput::new(Arc::clone(&registry), StreamTag::Stdout);
//!
//! let mut painted = Vec::new();
//! stdout.process("\x1b[1;31mfailed\x1b[0m: 3 tests", &mut |text: &str, style: &Arc<StyleHandle>| {
//!     painted.push(format!("{} [{}]", text, style.key));
//! });
//! assert_eq!(painted, ["failed [0;1;38;5;1]", ": 3 tests [0]"]);
//! ```

pub mod app;
pub mod core;
pub mod output;
pub mod parser;
pub mod style;

pub use crate::core::{Color, TerminalState};
pub use crate::output::{StyledOutput, StyledTextSink};
pub use crate::parser::{Decoder, StreamTag, TextFragment};
pub use crate::style::{CanonicalKey, StyleHandle, StyleRegistry};
