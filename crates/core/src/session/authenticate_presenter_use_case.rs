use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::identity::domain::auth_session::AuthSessionController;
use crate::identity::domain::face_template::TemplateRegistry;
use crate::session::domain::frame_source::FrameSource;
use crate::session::domain::overlay::{Overlay, OverlaySink};
use crate::session::session_logger::SessionLogger;
use crate::shared::config::SessionConfig;
use crate::shared::error::StartupError;

/// Result of the authentication phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthOutcome {
    pub identity: Option<String>,
    pub admitted: bool,
    pub frames: usize,
}

impl AuthOutcome {
    fn rejected(frames: usize) -> Self {
        Self {
            identity: None,
            admitted: false,
            frames,
        }
    }
}

/// Face-gated admission loop: read → verify → banner, until an approved
/// face has held the grant banner for the full display time.
pub struct AuthenticatePresenterUseCase {
    registry: TemplateRegistry,
    config: SessionConfig,
    overlay: Box<dyn OverlaySink>,
    logger: Box<dyn SessionLogger>,
    cancelled: Arc<AtomicBool>,
}

impl AuthenticatePresenterUseCase {
    pub fn new(
        registry: TemplateRegistry,
        config: SessionConfig,
        overlay: Box<dyn OverlaySink>,
        logger: Box<dyn SessionLogger>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            registry,
            config,
            overlay,
            logger,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    /// Runs until admission, quit, cancellation or end of stream. Only an
    /// empty registry is an error; everything else ends with an outcome.
    pub fn execute(&mut self, source: &mut dyn FrameSource) -> Result<AuthOutcome, StartupError> {
        let mut controller = AuthSessionController::new(&self.registry, &self.config)?;
        self.logger.info(&format!(
            "Authenticating against {} approved user(s)",
            self.registry.len()
        ));

        let mut frames = 0;
        let outcome = loop {
            if self.cancelled.load(Ordering::Relaxed) {
                self.logger.info("Authentication cancelled");
                break AuthOutcome::rejected(frames);
            }

            let input = match source.next_frame() {
                None => {
                    self.logger.info("Frame stream ended before admission");
                    break AuthOutcome::rejected(frames);
                }
                Some(Err(e)) => {
                    log::debug!("Skipping frame: {e}");
                    continue;
                }
                Some(Ok(input)) => input,
            };
            if input.quit {
                self.logger.info("Authentication aborted by user");
                break AuthOutcome::rejected(frames);
            }

            let start = Instant::now();
            let result = controller.process(input.face.as_ref());
            self.logger
                .timing("auth", start.elapsed().as_secs_f64() * 1000.0);
            self.logger.frame(input.index);
            frames += 1;

            self.overlay
                .render(input.index, &Overlay::Auth(result.banner.clone()));

            if let Some(identity) = result.admitted {
                self.logger.action("Access Granted");
                self.logger.info(&format!("Admitted presenter '{identity}'"));
                break AuthOutcome {
                    identity: Some(identity),
                    admitted: true,
                    frames,
                };
            }
        };

        self.logger.summary();
        Ok(outcome)
    }
}
