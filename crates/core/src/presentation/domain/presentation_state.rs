//! Presentation control loop state and its per-frame transition function.
//!
//! | phase      | token     | gate   | effect                                   |
//! |------------|-----------|--------|------------------------------------------|
//! | NotStarted | Start     | open   | → Running, clear annotations             |
//! | Running    | End       | open   | → NotStarted, slide 0, clear annotations |
//! | Running    | Prev/Next | open   | slide ∓/± 1, clear annotations           |
//! | Running    | EraseLast | open   | drop most recent stroke                  |
//! | Running    | Draw      | -      | start stroke on entry, append cursor     |
//! | Running    | Point     | -      | cursor only                              |
//! | any        | other     | -      | end active stroke                        |

use std::num::NonZeroUsize;

use crate::gesture::domain::debounce_gate::DebounceGate;
use crate::gesture::domain::gesture_classifier::{
    classify, GestureContext, GestureToken, HandReading, NavHotZone,
};
use crate::presentation::domain::annotation_store::AnnotationStore;
use crate::shared::landmarks::PixelPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
}

/// A state change produced by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentationAction {
    Started,
    Ended,
    PreviousSlide,
    NextSlide,
    AnnotationErased,
    StrokeStarted,
    Drawing,
    Pointing,
}

impl PresentationAction {
    /// Gesture label shown on the slide until another action replaces it.
    pub fn feedback_label(self) -> &'static str {
        match self {
            PresentationAction::Started => "Presentation Started",
            PresentationAction::Ended => "Presentation Ended",
            PresentationAction::PreviousSlide => "Previous Slide",
            PresentationAction::NextSlide => "Next Slide",
            PresentationAction::AnnotationErased => "Last Annotation Erased",
            PresentationAction::StrokeStarted | PresentationAction::Drawing => "Drawing",
            PresentationAction::Pointing => "Pointer",
        }
    }

    pub fn narration(self, presenter: &str) -> Option<String> {
        let text = match self {
            PresentationAction::Started => {
                return Some(format!("Welcome {presenter}. Presentation Started"))
            }
            PresentationAction::Ended => "Presentation Ended. Thank you.",
            PresentationAction::PreviousSlide => "Moving to Previous Slide",
            PresentationAction::NextSlide => "Moving to Next Slide",
            PresentationAction::AnnotationErased => "Erasing last annotation",
            PresentationAction::StrokeStarted => "Drawing mode activated",
            PresentationAction::Drawing | PresentationAction::Pointing => return None,
        };
        Some(text.to_string())
    }
}

/// Everything the presentation loop mutates.
#[derive(Clone, Debug)]
pub struct PresentationState {
    phase: Phase,
    slide_index: usize,
    annotations: AnnotationStore,
    debounce: DebounceGate,
    feedback: Option<PresentationAction>,
}

impl PresentationState {
    fn new(debounce_delay: u32) -> Self {
        Self {
            phase: Phase::NotStarted,
            slide_index: 0,
            annotations: AnnotationStore::new(),
            debounce: DebounceGate::new(debounce_delay),
            feedback: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn debounce(&self) -> &DebounceGate {
        &self.debounce
    }

    /// Most recent action, kept for the on-screen gesture label.
    pub fn feedback(&self) -> Option<PresentationAction> {
        self.feedback
    }
}

/// What one frame produced.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub token: GestureToken,
    pub action: Option<PresentationAction>,
    pub narration: Option<String>,
    /// Pointer position while pointing or drawing.
    pub cursor: Option<PixelPoint>,
}

pub struct PresentationStateMachine {
    presenter: String,
    slide_count: NonZeroUsize,
    hot_zone: NavHotZone,
    state: PresentationState,
}

impl PresentationStateMachine {
    pub fn new(
        presenter: impl Into<String>,
        slide_count: NonZeroUsize,
        hot_zone: NavHotZone,
        debounce_delay: u32,
    ) -> Self {
        Self {
            presenter: presenter.into(),
            slide_count,
            hot_zone,
            state: PresentationState::new(debounce_delay),
        }
    }

    pub fn presenter(&self) -> &str {
        &self.presenter
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count.get()
    }

    pub fn hot_zone(&self) -> NavHotZone {
        self.hot_zone
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Advances by one frame. `hand` is `None` when no hand was detected.
    pub fn step(&mut self, hand: Option<&HandReading>) -> StepOutcome {
        let token = match hand {
            Some(reading) => classify(reading.fingers, &self.context(reading)),
            None => GestureToken::None,
        };
        let cursor = hand.map(|r| r.cursor);

        let action = self.dispatch(token, cursor);
        if let Some(action) = action {
            self.state.feedback = Some(action);
        }
        self.state.debounce.tick();

        StepOutcome {
            token,
            action,
            narration: action.and_then(|a| a.narration(&self.presenter)),
            cursor: matches!(token, GestureToken::Point | GestureToken::Draw)
                .then_some(cursor)
                .flatten(),
        }
    }

    fn context(&self, reading: &HandReading) -> GestureContext {
        GestureContext {
            phase: self.state.phase,
            in_hot_zone: self.hot_zone.contains(reading.center),
            slide_index: self.state.slide_index,
            slide_count: self.slide_count.get(),
        }
    }

    fn dispatch(
        &mut self,
        token: GestureToken,
        cursor: Option<PixelPoint>,
    ) -> Option<PresentationAction> {
        if token != GestureToken::Draw {
            self.state.annotations.end_stroke();
        }

        match token {
            GestureToken::None => None,
            GestureToken::Point => Some(PresentationAction::Pointing),
            GestureToken::Draw => {
                let started = !self.state.annotations.is_drawing();
                if started {
                    self.state.annotations.start_stroke();
                }
                if let Some(point) = cursor {
                    self.state.annotations.append_to_active(point);
                }
                Some(if started {
                    PresentationAction::StrokeStarted
                } else {
                    PresentationAction::Drawing
                })
            }
            GestureToken::EraseLast if self.state.annotations.is_empty() => None,
            discrete => {
                if !self.state.debounce.fire(discrete) {
                    return None;
                }
                self.apply(discrete)
            }
        }
    }

    fn apply(&mut self, token: GestureToken) -> Option<PresentationAction> {
        let action = match token {
            GestureToken::Start => {
                self.state.phase = Phase::Running;
                self.state.annotations.clear();
                log::info!("Presentation started by '{}'", self.presenter);
                PresentationAction::Started
            }
            GestureToken::End => {
                self.state.phase = Phase::NotStarted;
                self.state.slide_index = 0;
                self.state.annotations.clear();
                log::info!("Presentation ended");
                PresentationAction::Ended
            }
            GestureToken::Prev => {
                self.state.slide_index = self.state.slide_index.checked_sub(1)?;
                self.state.annotations.clear();
                log::info!("Slide {}/{}", self.state.slide_index + 1, self.slide_count);
                PresentationAction::PreviousSlide
            }
            GestureToken::Next => {
                if self.state.slide_index + 1 >= self.slide_count.get() {
                    return None;
                }
                self.state.slide_index += 1;
                self.state.annotations.clear();
                log::info!("Slide {}/{}", self.state.slide_index + 1, self.slide_count);
                PresentationAction::NextSlide
            }
            GestureToken::EraseLast => {
                self.state.annotations.erase_last();
                PresentationAction::AnnotationErased
            }
            GestureToken::None | GestureToken::Point | GestureToken::Draw => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::domain::finger_state::FingerState;
    use crate::shared::landmarks::Point;

    const IN_ZONE: Point = Point::new(1000.0, 100.0);
    const OUT_OF_ZONE: Point = Point::new(300.0, 600.0);

    fn reading(bits: [u8; 5], center: Point, cursor: (i32, i32)) -> HandReading {
        HandReading {
            fingers: FingerState::from(bits),
            center,
            cursor: PixelPoint::new(cursor.0, cursor.1),
        }
    }

    fn palm() -> HandReading {
        reading([1, 1, 1, 1, 1], OUT_OF_ZONE, (0, 0))
    }

    fn fist() -> HandReading {
        reading([0, 0, 0, 0, 0], OUT_OF_ZONE, (0, 0))
    }

    fn next() -> HandReading {
        reading([0, 0, 0, 0, 1], IN_ZONE, (0, 0))
    }

    fn prev() -> HandReading {
        reading([1, 0, 0, 0, 0], IN_ZONE, (0, 0))
    }

    fn draw(x: i32, y: i32) -> HandReading {
        reading([0, 1, 0, 0, 0], OUT_OF_ZONE, (x, y))
    }

    fn erase() -> HandReading {
        reading([0, 1, 1, 1, 0], OUT_OF_ZONE, (0, 0))
    }

    fn machine(slides: usize) -> PresentationStateMachine {
        PresentationStateMachine::new(
            "alice",
            NonZeroUsize::new(slides).unwrap(),
            NavHotZone::new(750.0, 400.0),
            15,
        )
    }

    /// Idle frames until the debounce gate reopens.
    fn settle(m: &mut PresentationStateMachine) {
        while !m.state().debounce().is_open() {
            m.step(Some(&fist()));
        }
    }

    fn running_at(slides: usize, index: usize) -> PresentationStateMachine {
        let mut m = machine(slides);
        m.step(Some(&palm()));
        settle(&mut m);
        for _ in 0..index {
            m.step(Some(&next()));
            settle(&mut m);
        }
        assert_eq!(m.state().slide_index(), index);
        m
    }

    #[test]
    fn test_start_narrates_welcome() {
        let mut m = machine(3);
        let out = m.step(Some(&palm()));
        assert_eq!(out.token, GestureToken::Start);
        assert_eq!(out.action, Some(PresentationAction::Started));
        assert_eq!(out.narration.as_deref(), Some("Welcome alice. Presentation Started"));
        assert_eq!(m.state().phase(), Phase::Running);
    }

    #[test]
    fn test_next_from_slide_two_of_five() {
        let mut m = running_at(5, 2);
        m.step(Some(&draw(10, 10)));
        m.step(Some(&draw(20, 20)));
        assert_eq!(m.state().annotations().len(), 1);

        let out = m.step(Some(&next()));
        assert_eq!(out.action, Some(PresentationAction::NextSlide));
        assert_eq!(out.narration.as_deref(), Some("Moving to Next Slide"));
        assert_eq!(m.state().slide_index(), 3);
        assert!(m.state().annotations().is_empty());

        // Holding the pose does not fire again.
        let narrations: Vec<_> = (0..14)
            .filter_map(|_| m.step(Some(&next())).narration)
            .collect();
        assert!(narrations.is_empty());
        assert_eq!(m.state().slide_index(), 3);
    }

    #[test]
    fn test_held_next_fires_again_after_delay() {
        let mut m = running_at(5, 0);
        let fired: Vec<_> = (0..16)
            .map(|_| m.step(Some(&next())).action.is_some())
            .collect();
        assert!(fired[0]);
        assert!(fired[1..15].iter().all(|f| !f));
        assert!(fired[15]);
        assert_eq!(m.state().slide_index(), 2);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut m = running_at(2, 0);
        assert_eq!(m.step(Some(&prev())).token, GestureToken::None);
        assert_eq!(m.state().slide_index(), 0);

        m.step(Some(&next()));
        settle(&mut m);
        assert_eq!(m.state().slide_index(), 1);
        assert_eq!(m.step(Some(&next())).token, GestureToken::None);
        assert_eq!(m.state().slide_index(), 1);

        let out = m.step(Some(&prev()));
        assert_eq!(out.narration.as_deref(), Some("Moving to Previous Slide"));
        assert_eq!(m.state().slide_index(), 0);
    }

    #[test]
    fn test_navigation_requires_hot_zone() {
        let mut m = running_at(5, 1);
        let out = m.step(Some(&reading([0, 0, 0, 0, 1], OUT_OF_ZONE, (0, 0))));
        assert_eq!(out.token, GestureToken::None);
        assert_eq!(m.state().slide_index(), 1);
    }

    #[test]
    fn test_end_resets_slide_and_annotations() {
        let mut m = running_at(5, 3);
        m.step(Some(&draw(1, 1)));
        let out = m.step(Some(&reading([0, 0, 1, 1, 1], OUT_OF_ZONE, (0, 0))));
        assert_eq!(out.narration.as_deref(), Some("Presentation Ended. Thank you."));
        assert_eq!(m.state().phase(), Phase::NotStarted);
        assert_eq!(m.state().slide_index(), 0);
        assert!(m.state().annotations().is_empty());
    }

    #[test]
    fn test_draw_starts_one_stroke_per_entry() {
        let mut m = running_at(3, 0);
        let first = m.step(Some(&draw(1, 1)));
        assert_eq!(first.action, Some(PresentationAction::StrokeStarted));
        assert_eq!(first.narration.as_deref(), Some("Drawing mode activated"));
        assert_eq!(first.cursor, Some(PixelPoint::new(1, 1)));

        let second = m.step(Some(&draw(2, 2)));
        assert_eq!(second.action, Some(PresentationAction::Drawing));
        assert_eq!(second.narration, None);

        m.step(Some(&reading([0, 1, 1, 0, 0], OUT_OF_ZONE, (5, 5))));
        m.step(Some(&draw(3, 3)));

        let strokes = m.state().annotations().strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points(), &[PixelPoint::new(1, 1), PixelPoint::new(2, 2)]);
        assert_eq!(strokes[1].points(), &[PixelPoint::new(3, 3)]);
    }

    #[test]
    fn test_missing_hand_pauses_stroke() {
        let mut m = running_at(3, 0);
        m.step(Some(&draw(1, 1)));
        let out = m.step(None);
        assert_eq!(out.token, GestureToken::None);
        assert!(!m.state().annotations().is_drawing());
        assert_eq!(m.state().annotations().len(), 1);

        m.step(Some(&draw(4, 4)));
        assert_eq!(m.state().annotations().len(), 2);
    }

    #[test]
    fn test_draw_is_not_debounced() {
        let mut m = machine(3);
        m.step(Some(&palm()));
        assert!(!m.state().debounce().is_open());
        let out = m.step(Some(&draw(1, 1)));
        assert_eq!(out.action, Some(PresentationAction::StrokeStarted));
    }

    #[test]
    fn test_erase_last_removes_stroke() {
        let mut m = running_at(3, 0);
        m.step(Some(&draw(1, 1)));
        m.step(Some(&fist()));
        m.step(Some(&draw(2, 2)));
        let out = m.step(Some(&erase()));
        assert_eq!(out.narration.as_deref(), Some("Erasing last annotation"));
        assert_eq!(m.state().annotations().len(), 1);
    }

    #[test]
    fn test_erase_on_empty_keeps_gate_open() {
        let mut m = running_at(3, 0);
        let out = m.step(Some(&erase()));
        assert_eq!(out.token, GestureToken::EraseLast);
        assert_eq!(out.action, None);
        assert_eq!(out.narration, None);
        assert!(m.state().debounce().is_open());
    }

    #[test]
    fn test_point_shows_cursor_without_annotating() {
        let mut m = running_at(3, 0);
        let out = m.step(Some(&reading([0, 1, 1, 0, 0], OUT_OF_ZONE, (7, 8))));
        assert_eq!(out.action, Some(PresentationAction::Pointing));
        assert_eq!(out.cursor, Some(PixelPoint::new(7, 8)));
        assert!(m.state().annotations().is_empty());
        assert_eq!(m.state().feedback().map(|a| a.feedback_label()), Some("Pointer"));
    }

    #[test]
    fn test_feedback_persists_across_idle_frames() {
        let mut m = running_at(3, 0);
        m.step(Some(&next()));
        m.step(None);
        m.step(Some(&fist()));
        assert_eq!(
            m.state().feedback().map(|a| a.feedback_label()),
            Some("Next Slide")
        );
    }

    #[test]
    fn test_not_started_ignores_drawing() {
        let mut m = machine(3);
        let out = m.step(Some(&draw(1, 1)));
        assert_eq!(out.token, GestureToken::None);
        assert!(m.state().annotations().is_empty());
    }
}
