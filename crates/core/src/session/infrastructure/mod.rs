pub mod command_speaker;
pub mod jsonl_frame_source;
pub mod log_overlay_sink;
pub mod threaded_narrator;
