//! Styled output pipeline
//!
//! Connects a stream's [`Decoder`] to the shared [`StyleRegistry`]: every
//! decoded fragment is delivered to a sink together with the style handle
//! for its rendering state.

use std::sync::Arc;

use crate::parser::{Decoder, DecoderConfig, StreamTag, TextFragment};
use crate::style::{StyleHandle, StyleRegistry};

/// Receives decoded text and the style to paint it with
pub trait StyledTextSink {
    fn styled_text(&mut self, text: &str, style: &Arc<StyleHandle>);
}

impl<F> StyledTextSink for F
where
    F: FnMut(&str, &Arc<StyleHandle>),
{
    fn styled_text(&mut self, text: &str, style: &Arc<StyleHandle>) {
        self(text, style)
    }
}

/// Decoder for one process stream, resolving styles through a shared registry
#[derive(Debug)]
pub struct StyledOutput {
    decoder: Decoder,
    registry: Arc<StyleRegistry>,
    stream: StreamTag,
}

impl StyledOutput {
    pub fn new(registry: Arc<StyleRegistry>, stream: StreamTag) -> Self {
        Self::with_config(registry, stream, DecoderConfig::default())
    }

    pub fn with_config(registry: Arc<StyleRegistry>, stream: StreamTag, config: DecoderConfig) -> Self {
        Self {
            decoder: Decoder::with_config(config),
            registry,
            stream,
        }
    }

    pub fn stream(&self) -> StreamTag {
        self.stream
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn registry(&self) -> &Arc<StyleRegistry> {
        &self.registry
    }

    /// Decode a chunk and deliver its fragments to `sink`
    pub fn process(&mut self, text: &str, sink: &mut impl StyledTextSink) {
        let fragments = self.decoder.feed(text, self.stream);
        Self::deliver(&self.registry, fragments, sink);
    }

    /// End of stream: deliver any held-back bytes as text
    pub fn finish(&mut self, sink: &mut impl StyledTextSink) {
        let fragments = self.decoder.finish(self.stream);
        Self::deliver(&self.registry, fragments, sink);
    }

    fn deliver(
        registry: &StyleRegistry,
        fragments: impl Iterator<Item = TextFragment>,
        sink: &mut impl StyledTextSink,
    ) {
        for fragment in fragments {
            let style = registry.resolve_state(&fragment.state, fragment.stream);
            sink.styled_text(&fragment.text, &style);
        }
    }
}
