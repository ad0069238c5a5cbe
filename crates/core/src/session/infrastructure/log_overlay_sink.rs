use crate::session::domain::overlay::{Overlay, OverlaySink};

/// Overlay sink for headless runs: logs at debug level, and at info level
/// whenever the visible text changes.
#[derive(Default)]
pub struct LogOverlaySink {
    last_text: Option<String>,
}

impl LogOverlaySink {
    pub fn new() -> Self {
        Self::default()
    }
}

fn headline(overlay: &Overlay) -> String {
    match overlay {
        Overlay::Auth(banner) => banner.to_string(),
        Overlay::Scene(scene) => {
            let mut parts = vec![scene.presenter_label.clone()];
            if let Some(prompt) = scene.prompt {
                parts.push(prompt.to_string());
            }
            if let Some(slide) = &scene.slide {
                parts.push(format!("slide {} ({})", scene.slide_index + 1, slide.display()));
            }
            if let Some(label) = &scene.gesture_label {
                parts.push(label.clone());
            }
            parts.join(" | ")
        }
    }
}

impl OverlaySink for LogOverlaySink {
    fn render(&mut self, frame_index: usize, overlay: &Overlay) {
        let text = headline(overlay);
        if let Overlay::Scene(scene) = overlay {
            log::debug!(
                "frame {frame_index}: cursor {:?}, {} stroke(s)",
                scene.cursor,
                scene.strokes.len()
            );
        }
        if self.last_text.as_deref() != Some(text.as_str()) {
            log::info!("frame {frame_index}: {text}");
            self.last_text = Some(text);
        }
    }
}
