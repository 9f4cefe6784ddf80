use crate::classifier::Classifier;
use crate::ir::{LineEvent, Span};

/// An incremental line splitter that classifies output as it arrives.
///
/// `LineStream` buffers partial lines between [`update`](Self::update) calls
/// and only classifies a line once its terminating `\n` has been seen. Offsets
/// in the produced [`LineEvent`]s are absolute positions in the whole stream,
/// so feeding the same text in any chunking yields identical events.
pub struct LineStream {
    classifier: Classifier,
    buffer: String,
    global_offset: usize,
    line_number: usize,
}

impl Default for LineStream {
    /// A stream over the reference vocabulary.
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}

impl LineStream {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            buffer: String::new(),
            global_offset: 0,
            line_number: 0,
        }
    }

    /// Appends input to the internal buffer and classifies every completed line.
    ///
    /// # Arguments
    ///
    /// * `input` - The next slice of output text.
    ///
    /// # Returns
    ///
    /// One `LineEvent` per line completed by this chunk.
    pub fn update(&mut self, input: &str) -> Vec<LineEvent> {
        self.buffer.push_str(input);
        self.process_buffer()
    }

    /// Consumes the stream, classifying any trailing unterminated line.
    pub fn finish(mut self) -> Vec<LineEvent> {
        let mut events = self.process_buffer();
        if !self.buffer.is_empty() {
            let tail = std::mem::take(&mut self.buffer);
            let content = tail.strip_suffix('\r').unwrap_or(&tail);
            events.push(self.emit(content));
        }
        events
    }

    /// Classifies a complete text in one go.
    pub fn classify_text(mut self, input: &str) -> Vec<LineEvent> {
        let mut events = self.update(input);
        events.extend(self.finish());
        events
    }

    /// Bytes consumed so far, excluding the buffered partial line.
    pub fn offset(&self) -> usize {
        self.global_offset
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn process_buffer(&mut self) -> Vec<LineEvent> {
        // Everything up to and including the last newline is safe to classify.
        let process_len = match self.buffer.rfind('\n') {
            Some(last_nl) => last_nl + 1,
            None => return Vec::new(),
        };

        let chunk: String = self.buffer.drain(..process_len).collect();
        chunk
            .split_inclusive('\n')
            .map(|raw| {
                let content = raw.strip_suffix('\n').unwrap_or(raw);
                let content = content.strip_suffix('\r').unwrap_or(content);
                let event = self.emit(content);
                // The terminator counts towards the offset, not the span.
                self.global_offset += raw.len() - content.len();
                event
            })
            .collect()
    }

    fn emit(&mut self, content: &str) -> LineEvent {
        let span = Span::new(self.global_offset, self.global_offset + content.len());
        let event = LineEvent::new(
            self.line_number,
            span,
            content,
            self.classifier.classify_line(content),
        );
        self.global_offset = span.end;
        self.line_number += 1;
        event
    }
}
