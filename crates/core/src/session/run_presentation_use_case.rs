use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::gesture::domain::gesture_classifier::{CursorMapper, HandReading};
use crate::presentation::domain::presentation_state::{Phase, PresentationStateMachine};
use crate::presentation::domain::slide_deck::SlideDeck;
use crate::session::domain::frame_source::FrameSource;
use crate::session::domain::narrator::Narrator;
use crate::session::domain::overlay::{Overlay, OverlaySink, SceneOverlay};
use crate::session::session_logger::SessionLogger;
use crate::shared::config::SessionConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationSummary {
    pub frames: usize,
    /// Narrated actions (start, end, navigation, erase, stroke start).
    pub actions: usize,
    pub final_phase: Phase,
    pub final_slide: usize,
}

/// Gesture-driven presentation loop: read → classify → debounce → dispatch
/// → narrate → overlay, one frame at a time.
pub struct RunPresentationUseCase {
    machine: PresentationStateMachine,
    deck: SlideDeck,
    mapper: CursorMapper,
    frame_width: u32,
    frame_height: u32,
    narrator: Box<dyn Narrator>,
    overlay: Box<dyn OverlaySink>,
    logger: Box<dyn SessionLogger>,
    cancelled: Arc<AtomicBool>,
}

impl RunPresentationUseCase {
    pub fn new(
        presenter: impl Into<String>,
        deck: SlideDeck,
        config: &SessionConfig,
        narrator: Box<dyn Narrator>,
        overlay: Box<dyn OverlaySink>,
        logger: Box<dyn SessionLogger>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            machine: PresentationStateMachine::new(
                presenter,
                deck.slide_count(),
                config.hot_zone(),
                config.debounce_delay,
            ),
            deck,
            mapper: config.cursor_mapper(),
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            narrator,
            overlay,
            logger,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn machine(&self) -> &PresentationStateMachine {
        &self.machine
    }

    /// Runs until quit, cancellation or end of stream.
    pub fn execute(&mut self, source: &mut dyn FrameSource) -> PresentationSummary {
        self.logger.info(&format!(
            "Presenting {} slide(s) for '{}'",
            self.deck.len(),
            self.machine.presenter()
        ));

        let mut frames = 0;
        let mut actions = 0;
        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                self.logger.info("Presentation cancelled");
                break;
            }

            let input = match source.next_frame() {
                None => break,
                Some(Err(e)) => {
                    log::debug!("Skipping frame: {e}");
                    continue;
                }
                Some(Ok(input)) => input,
            };
            if input.quit {
                self.logger.info("Presentation closed by user");
                break;
            }

            let start = Instant::now();
            let reading = input.hand.as_ref().map(|hand| {
                HandReading::from_hand(hand, &self.mapper, self.frame_width, self.frame_height)
            });
            let outcome = self.machine.step(reading.as_ref());
            self.logger
                .timing("step", start.elapsed().as_secs_f64() * 1000.0);
            self.logger.frame(input.index);
            frames += 1;

            if let Some(text) = &outcome.narration {
                self.narrator.narrate(text);
                actions += 1;
                if let Some(action) = outcome.action {
                    self.logger.action(action.feedback_label());
                }
            }

            let scene = SceneOverlay::compose(&self.machine, &self.deck, &outcome);
            self.overlay.render(input.index, &Overlay::Scene(scene));
        }

        self.logger.summary();
        let state = self.machine.state();
        PresentationSummary {
            frames,
            actions,
            final_phase: state.phase(),
            final_slide: state.slide_index(),
        }
    }
}
