use std::fs;
use std::path::{Path, PathBuf};

use crate::presentation::domain::slide_deck::SlideDeck;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::error::StartupError;

/// Loads the pre-rendered slide images from `dir`.
///
/// Slides are ordered by file-name length, then name, so exporter output
/// like `Slide2.png` sorts before `Slide10.png`.
pub fn load_slide_deck(dir: &Path) -> Result<SlideDeck, StartupError> {
    if !dir.is_dir() {
        return Err(StartupError::NoSlides(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|source| StartupError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut slides: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| StartupError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.is_file() && is_slide_image(&path) {
            slides.push(path);
        }
    }
    slides.sort_by_cached_key(|p| {
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (name.len(), name)
    });

    let deck = SlideDeck::new(slides).ok_or_else(|| StartupError::NoSlides(dir.to_path_buf()))?;
    log::info!("Loaded {} slide(s) from {}", deck.len(), dir.display());
    Ok(deck)
}

fn is_slide_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_orders_by_name_length_then_name() {
        let tmp = TempDir::new().unwrap();
        for name in ["Slide10.png", "Slide2.png", "Slide1.png", "readme.txt"] {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }

        let deck = load_slide_deck(tmp.path()).unwrap();
        let names: Vec<_> = deck
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Slide1.png", "Slide2.png", "Slide10.png"]);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = load_slide_deck(&tmp.path().join("ConvertedSlides"));
        assert!(matches!(err, Err(StartupError::NoSlides(_))));
    }

    #[test]
    fn test_directory_without_images_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.md"), b"x").unwrap();
        assert!(matches!(
            load_slide_deck(tmp.path()),
            Err(StartupError::NoSlides(_))
        ));
    }
}
