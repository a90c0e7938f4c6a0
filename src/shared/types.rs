use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PREVIEW_CHARS;

/// One captured clipboard value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClipboardSnapshot {
    pub id: String,
    pub content: String,
    pub preview: String, // Truncated preview for logs
    pub timestamp: DateTime<Utc>,
}

impl ClipboardSnapshot {
    /// Capture a text value now
    pub fn new_text(content: String) -> Self {
        let preview = preview_of(&content);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            preview,
            timestamp: Utc::now(),
        }
    }
}

/// First `PREVIEW_CHARS` characters, with an ellipsis when cut
pub fn preview_of(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Physical keys the gesture and chords are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    LeftAlt,
    RightAlt,
    LeftShift,
    RightShift,
    Q,
    Digit(u8),
}

/// "Jump to slot N" chord, N in 1..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord(u8);

impl Chord {
    pub fn slot(slot: u8) -> Option<Self> {
        (1..=9).contains(&slot).then_some(Self(slot))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// History index the chord jumps to
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_preview_untouched() {
        assert_eq!(preview_of("hello"), "hello");
    }

    #[test]
    fn test_long_preview_truncated_on_char_boundary() {
        let text = "é".repeat(PREVIEW_CHARS + 5);
        let preview = preview_of(&text);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_chord_slots() {
        assert!(Chord::slot(0).is_none());
        assert!(Chord::slot(10).is_none());
        let chord = Chord::slot(3).unwrap();
        assert_eq!(chord.number(), 3);
        assert_eq!(chord.index(), 2);
    }

    #[test]
    fn test_snapshot_ids_unique() {
        let a = ClipboardSnapshot::new_text("same".into());
        let b = ClipboardSnapshot::new_text("same".into());
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, b.content);
    }
}
