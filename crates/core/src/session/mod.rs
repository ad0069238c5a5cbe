pub mod authenticate_presenter_use_case;
pub mod domain;
pub mod infrastructure;
pub mod run_presentation_use_case;
pub mod session_logger;
