pub mod gesture;
pub mod identity;
pub mod presentation;
pub mod session;
pub mod shared;
