pub mod frame_source;
pub mod narrator;
pub mod overlay;
