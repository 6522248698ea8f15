//! Photo Preview
//!
//! Photo locker and community feed cards open a shared preview modal showing
//! the full image and the card's metadata line.

/// What the preview modal shows for one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPreview {
    pub src: String,
    pub caption: String,
}

impl PhotoPreview {
    /// Build from the clicked image's source and the card's metadata text,
    /// if the card has any
    pub fn from_card(src: &str, meta: Option<&str>) -> Self {
        Self {
            src: src.to_string(),
            caption: meta.map(|m| collapse_whitespace(m.trim())).unwrap_or_default(),
        }
    }
}

/// Metadata blocks are multi-line in the markup; keep them on one line
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_from_meta() {
        let preview = PhotoPreview::from_card(
            "/media/photos/1.jpg",
            Some("\n    Leg day progress\n    · Public · @sam\n  "),
        );
        assert_eq!(preview.src, "/media/photos/1.jpg");
        assert_eq!(preview.caption, "Leg day progress · Public · @sam");
    }

    #[test]
    fn test_missing_meta() {
        assert_eq!(PhotoPreview::from_card("a.png", None).caption, "");
    }
}
