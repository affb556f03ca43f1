//! Style canonicalization and deduplication
//!
//! - `key`: deterministic SGR serialization of a rendering state
//! - `attributes`: palette-resolved attributes for painting
//! - `registry`: shared get-or-create map from keys to style handles

mod attributes;
mod key;
mod registry;

pub use attributes::TextAttributes;
pub use key::CanonicalKey;
pub use registry::{StyleHandle, StyleRegistry};
