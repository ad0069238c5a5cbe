pub mod debounce_gate;
pub mod finger_state;
pub mod gesture_classifier;
