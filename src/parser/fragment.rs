//! Decoded output
//!
//! Text fragments produced by the decoder, tagged with the stream they came
//! from and the rendering state they should be painted in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::TerminalState;

/// The process stream a chunk of text was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTag {
    Stdout,
    Stderr,
    /// Messages produced by the host itself (e.g. "process finished")
    System,
}

impl StreamTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamTag::Stdout => "stdout",
            StreamTag::Stderr => "stderr",
            StreamTag::System => "system",
        }
    }
}

impl fmt::Display for StreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(StreamTag::Stdout),
            "stderr" => Ok(StreamTag::Stderr),
            "system" => Ok(StreamTag::System),
            other => Err(format!("unknown stream {other:?}")),
        }
    }
}

/// A maximal run of literal text and the state it was emitted in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub state: TerminalState,
    pub stream: StreamTag,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, state: TerminalState, stream: StreamTag) -> Self {
        Self {
            text: text.into(),
            state,
            stream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_tag_parse() {
        assert_eq!("stdout".parse::<StreamTag>(), Ok(StreamTag::Stdout));
        assert_eq!("stderr".parse::<StreamTag>(), Ok(StreamTag::Stderr));
        assert_eq!("system".parse::<StreamTag>(), Ok(StreamTag::System));
        assert!("stdin".parse::<StreamTag>().is_err());
    }

    #[test]
    fn test_stream_tag_serialization() {
        let json = serde_json::to_string(&StreamTag::Stderr).unwrap();
        assert_eq!(json, "\"stderr\"");
    }

    #[test]
    fn test_fragment_serialization() {
        let fragment = TextFragment::new("Hello", TerminalState::new(), StreamTag::Stdout);
        let json = serde_json::to_string(&fragment).unwrap();
        let restored: TextFragment = serde_json::from_str(&json).unwrap();
        assert_eq!(fragment, restored);
    }
}
