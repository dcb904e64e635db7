use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A showcase deck: ordered, index-addressable slides plus presentation
/// metadata. Immutable once constructed; a reload builds a fresh deck.
#[derive(Debug, Clone)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default)]
pub struct DeckMeta {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub theme: Option<String>,
}

/// One showcase slide. `image` is resolved relative to the manifest file.
#[derive(Debug, Clone)]
pub struct Slide {
    pub index: usize,
    pub image: PathBuf,
    pub label: String,
    pub icon: String,
    pub alt: String,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    slides: Vec<ManifestSlide>,
}

#[derive(Debug, Deserialize)]
struct ManifestSlide {
    image: PathBuf,
    label: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

/// Load and validate a deck manifest (YAML).
pub fn load(path: &Path) -> Result<Deck> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new("."));
    parse(&contents, base).with_context(|| format!("Invalid deck manifest {}", path.display()))
}

/// Parse manifest text against a base directory for image paths.
pub fn parse(contents: &str, base: &Path) -> Result<Deck> {
    let manifest: Manifest = serde_yaml::from_str(contents)?;

    if manifest.slides.is_empty() {
        anyhow::bail!("No slides found in manifest");
    }

    let mut slides = Vec::with_capacity(manifest.slides.len());
    for (index, slide) in manifest.slides.into_iter().enumerate() {
        if slide.label.trim().is_empty() {
            anyhow::bail!("Slide {} has an empty label", index + 1);
        }
        let image = if slide.image.is_absolute() {
            slide.image
        } else {
            base.join(&slide.image)
        };
        slides.push(Slide {
            index,
            image,
            alt: slide.alt.unwrap_or_else(|| slide.label.clone()),
            icon: slide.icon.unwrap_or_else(|| "\u{25A3}".to_string()),
            label: slide.label,
        });
    }

    Ok(Deck {
        meta: DeckMeta {
            title: manifest.title,
            tagline: manifest.tagline,
            theme: manifest.theme,
        },
        slides,
    })
}

impl Deck {
    pub fn labels(&self) -> Vec<String> {
        self.slides.iter().map(|s| s.label.clone()).collect()
    }

    pub fn image_paths(&self) -> Vec<PathBuf> {
        self.slides.iter().map(|s| s.image.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
title: Acme Studio
theme: dark
slides:
  - image: shots/editor.png
    label: Editor
    icon: \"\u{270E}\"
  - image: shots/timeline.png
    label: Timeline
";

    #[test]
    fn parses_slides_in_order() {
        let deck = parse(MANIFEST, Path::new("/decks")).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].index, 0);
        assert_eq!(deck.slides[0].label, "Editor");
        assert_eq!(deck.slides[1].index, 1);
        assert_eq!(deck.meta.title.as_deref(), Some("Acme Studio"));
    }

    #[test]
    fn resolves_images_against_base() {
        let deck = parse(MANIFEST, Path::new("/decks")).unwrap();
        assert_eq!(deck.slides[0].image, Path::new("/decks/shots/editor.png"));
    }

    #[test]
    fn alt_and_icon_default_from_label() {
        let deck = parse(MANIFEST, Path::new(".")).unwrap();
        assert_eq!(deck.slides[1].alt, "Timeline");
        assert!(!deck.slides[1].icon.is_empty());
    }

    #[test]
    fn empty_deck_is_an_error() {
        let err = parse("title: Nothing\nslides: []\n", Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("No slides"));
    }

    #[test]
    fn empty_label_is_an_error() {
        let manifest = "slides:\n  - image: a.png\n    label: \"  \"\n";
        assert!(parse(manifest, Path::new(".")).is_err());
    }
}
