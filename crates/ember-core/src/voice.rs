/// Speech-to-text seam. The embedding UI owns the recognition engine; the
/// core only ever sees the finished transcript.
///
/// `start` registers a one-shot completion handler and invokes it exactly
/// once: `Some(text)` on success, `None` when the provider has nothing to
/// report. There is no cancellation for an in-flight transcription.
pub trait TranscriptionProvider {
    fn start(&mut self, on_result: Box<dyn FnOnce(Option<String>) + '_>);
}
