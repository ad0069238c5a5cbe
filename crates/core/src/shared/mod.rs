pub mod config;
pub mod constants;
pub mod error;
pub mod face_mesh;
pub mod hand_landmarks;
pub mod landmarks;
