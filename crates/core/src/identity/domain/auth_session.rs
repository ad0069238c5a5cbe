use crate::identity::domain::face_consistency::{FaceConsistencyTracker, FaceFingerprint};
use crate::identity::domain::face_template::TemplateRegistry;
use crate::identity::domain::identity_verifier::IdentityVerifier;
use crate::shared::config::SessionConfig;
use crate::shared::error::StartupError;
use crate::shared::face_mesh::FaceMesh;

/// Banner shown over the camera view while authenticating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthBanner {
    Granted(String),
    Denied,
}

impl std::fmt::Display for AuthBanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthBanner::Granted(identity) => write!(f, "ACCESS GRANTED: {identity}"),
            AuthBanner::Denied => write!(f, "ACCESS DENIED"),
        }
    }
}

/// Transient single-slot admission state. Lives only for the auth phase.
#[derive(Clone, Debug, Default)]
pub struct AuthSession {
    identity: Option<String>,
    verified: bool,
    countdown: u32,
    tracker: FaceConsistencyTracker,
}

impl AuthSession {
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn last_fingerprint(&self) -> Option<FaceFingerprint> {
        self.tracker.previous()
    }

    fn grant(&mut self, identity: String, display_time: u32) {
        self.identity = Some(identity);
        self.verified = true;
        self.countdown = display_time;
    }

    fn revoke(&mut self) {
        self.identity = None;
        self.verified = false;
        self.countdown = 0;
    }
}

/// What one authentication frame produced.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthFrameResult {
    pub banner: AuthBanner,
    pub face_changed: bool,
    /// Set on the frame the grant banner has been shown for its full time.
    pub admitted: Option<String>,
}

/// Per-frame admission decisions against a loaded template registry.
pub struct AuthSessionController<'a> {
    registry: &'a TemplateRegistry,
    verifier: IdentityVerifier,
    min_face_size: f64,
    display_time: u32,
    frame_width: u32,
    frame_height: u32,
    session: AuthSession,
}

impl<'a> AuthSessionController<'a> {
    pub fn new(registry: &'a TemplateRegistry, config: &SessionConfig) -> Result<Self, StartupError> {
        if registry.is_empty() {
            return Err(StartupError::EmptyRegistry);
        }
        Ok(Self {
            registry,
            verifier: IdentityVerifier::new(config.face_match_threshold),
            min_face_size: config.min_face_size,
            display_time: config.display_time,
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            session: AuthSession::default(),
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Advances the session by one frame. `face` is `None` when no face was
    /// detected.
    ///
    /// The grant frame sets the countdown to the display time; each later
    /// frame consumes one, and the frame that finds it at zero reports
    /// `admitted`. A face change or absence revokes the grant at any point.
    pub fn process(&mut self, face: Option<&FaceMesh>) -> AuthFrameResult {
        let fingerprint = face.map(FaceFingerprint::from_mesh);
        let face_changed = self.session.tracker.observe(fingerprint);
        if face_changed || face.is_none() {
            if self.session.verified {
                log::info!("Face changed or left the frame, access revoked");
            }
            self.session.revoke();
        }

        if let Some(mesh) = face {
            self.try_verify(mesh);
        }

        let banner = match (&self.session.identity, self.session.verified) {
            (Some(identity), true) => AuthBanner::Granted(identity.clone()),
            _ => AuthBanner::Denied,
        };

        let mut admitted = None;
        if self.session.verified {
            if self.session.countdown == 0 {
                admitted = self.session.identity.clone();
            } else {
                self.session.countdown -= 1;
            }
        }

        AuthFrameResult {
            banner,
            face_changed,
            admitted,
        }
    }

    fn try_verify(&mut self, mesh: &FaceMesh) {
        if self.session.verified {
            return;
        }
        let area = mesh.pixel_area(self.frame_width, self.frame_height);
        if area <= self.min_face_size {
            log::debug!("Face too small for matching: {area:.0}px²");
            return;
        }
        let Some(best) = self.verifier.best_match(mesh.landmarks(), self.registry) else {
            return;
        };
        if self.verifier.admits(&best) {
            log::info!("Access granted to '{}' (score {:.3})", best.label, best.score);
            self.session.grant(best.label, self.display_time);
        } else {
            log::debug!(
                "Best match '{}' scored {:.3}, below {:.3}",
                best.label,
                best.score,
                self.verifier.threshold()
            );
        }
    }
}
