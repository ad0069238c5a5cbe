pub mod annotation_store;
pub mod presentation_state;
pub mod slide_deck;
