pub mod auth_session;
pub mod face_consistency;
pub mod face_template;
pub mod identity_verifier;
pub mod template_extractor;
