use std::thread::JoinHandle;

use crossbeam_channel::Sender;

use crate::session::domain::narrator::{Narrator, Speaker};

/// Narrator backed by one worker thread that speaks queued texts in order.
///
/// `narrate` only enqueues. Dropping the narrator closes the queue; the
/// worker finishes what is queued and exits on its own.
pub struct ThreadedNarrator {
    tx: Option<Sender<String>>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadedNarrator {
    pub fn new(speaker: Box<dyn Speaker>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<String>();
        let worker = std::thread::spawn(move || {
            let mut speaker = speaker;
            for text in rx {
                if let Err(e) = speaker.speak(&text) {
                    log::warn!("Narration failed for '{text}': {e}");
                }
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Closes the queue and waits for queued narration to finish.
    pub fn shutdown(mut self) {
        self.close_and_join();
    }

    fn close_and_join(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::warn!("Narration worker panicked");
            }
        }
    }
}

impl Narrator for ThreadedNarrator {
    fn narrate(&self, text: &str) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(text.to_string()).is_err() {
            log::debug!("Narration worker gone, dropping '{text}'");
        }
    }
}

impl Drop for ThreadedNarrator {
    fn drop(&mut self) {
        drop(self.tx.take());
        // Detach: the loop never waits on speech.
        self.worker.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingSpeaker {
        spoken: Arc<Mutex<Vec<String>>>,
    }

    impl Speaker for RecordingSpeaker {
        fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
            if text == "fail" {
                return Err("tts unavailable".into());
            }
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_speaks_in_order() {
        let spoken = Arc::new(Mutex::new(Vec::new()));
        let narrator = ThreadedNarrator::new(Box::new(RecordingSpeaker {
            spoken: spoken.clone(),
        }));
        narrator.narrate("Moving to Next Slide");
        narrator.narrate("Moving to Previous Slide");
        narrator.shutdown();

        assert_eq!(
            *spoken.lock().unwrap(),
            vec!["Moving to Next Slide", "Moving to Previous Slide"]
        );
    }

    /// Holds every utterance until the test releases it.
    struct GatedSpeaker {
        started: crossbeam_channel::Sender<()>,
        release: crossbeam_channel::Receiver<()>,
        spoken: Arc<Mutex<Vec<String>>>,
    }

    impl Speaker for GatedSpeaker {
        fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
            let _ = self.started.send(());
            self.release.recv()?;
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_narrate_returns_while_speaker_is_busy() {
        let spoken = Arc::new(Mutex::new(Vec::new()));
        let (started_tx, started_rx) = crossbeam_channel::unbounded();
        let (release_tx, release_rx) = crossbeam_channel::unbounded();
        let narrator = ThreadedNarrator::new(Box::new(GatedSpeaker {
            started: started_tx,
            release: release_rx,
            spoken: spoken.clone(),
        }));

        narrator.narrate("Presentation Started");
        started_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();

        // The worker is parked inside speak(); these must still return.
        narrator.narrate("Moving to Next Slide");
        narrator.narrate("Drawing mode activated");
        narrator.narrate("Erased last drawing");
        assert!(spoken.lock().unwrap().is_empty());

        for _ in 0..4 {
            release_tx.send(()).unwrap();
        }
        narrator.shutdown();

        assert_eq!(
            *spoken.lock().unwrap(),
            vec![
                "Presentation Started",
                "Moving to Next Slide",
                "Drawing mode activated",
                "Erased last drawing",
            ]
        );
    }

    #[test]
    fn test_speaker_error_does_not_stop_worker() {
        let spoken = Arc::new(Mutex::new(Vec::new()));
        let narrator = ThreadedNarrator::new(Box::new(RecordingSpeaker {
            spoken: spoken.clone(),
        }));
        narrator.narrate("fail");
        narrator.narrate("Drawing mode activated");
        narrator.shutdown();

        assert_eq!(*spoken.lock().unwrap(), vec!["Drawing mode activated"]);
    }
}
