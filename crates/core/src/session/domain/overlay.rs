use std::path::PathBuf;

use crate::gesture::domain::gesture_classifier::NavHotZone;
use crate::identity::domain::auth_session::AuthBanner;
use crate::presentation::domain::presentation_state::{
    Phase, PresentationStateMachine, StepOutcome,
};
use crate::presentation::domain::slide_deck::SlideDeck;
use crate::shared::landmarks::PixelPoint;

pub const IDLE_PROMPT: &str = "Show all fingers to START presentation";

/// Everything drawn over one presentation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneOverlay {
    pub phase: Phase,
    pub slide_index: usize,
    /// Slide image to show; `None` before the presentation starts.
    pub slide: Option<PathBuf>,
    pub prompt: Option<&'static str>,
    pub presenter_label: String,
    pub gesture_label: Option<String>,
    pub cursor: Option<PixelPoint>,
    pub strokes: Vec<Vec<PixelPoint>>,
    pub hot_zone: NavHotZone,
}

impl SceneOverlay {
    pub fn compose(
        machine: &PresentationStateMachine,
        deck: &SlideDeck,
        outcome: &StepOutcome,
    ) -> Self {
        let state = machine.state();
        let running = state.phase() == Phase::Running;
        Self {
            phase: state.phase(),
            slide_index: state.slide_index(),
            slide: running
                .then(|| deck.get(state.slide_index()).map(|p| p.to_path_buf()))
                .flatten(),
            prompt: (!running).then_some(IDLE_PROMPT),
            presenter_label: format!("Presenter: {}", machine.presenter()),
            gesture_label: state
                .feedback()
                .map(|a| format!("Gesture: {}", a.feedback_label())),
            cursor: outcome.cursor,
            strokes: state
                .annotations()
                .strokes()
                .iter()
                .map(|s| s.points().to_vec())
                .collect(),
            hot_zone: machine.hot_zone(),
        }
    }
}

/// Render request for one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Auth(AuthBanner),
    Scene(SceneOverlay),
}

/// Receives one overlay per processed frame. Rendering is external.
pub trait OverlaySink {
    fn render(&mut self, frame_index: usize, overlay: &Overlay);
}
