pub mod slide_directory;
