/// Fire-and-forget speech output.
///
/// `narrate` must return immediately. The control loop never waits for,
/// cancels or observes an utterance; overlapping requests are the
/// implementation's business.
pub trait Narrator {
    fn narrate(&self, text: &str);
}

/// Blocking text-to-speech backend driven from a narration worker.
pub trait Speaker: Send {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Discards all narration.
pub struct NullNarrator;

impl Narrator for NullNarrator {
    fn narrate(&self, _text: &str) {}
}
