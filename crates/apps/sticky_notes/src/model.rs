//! Sticky note records and their lenient persisted-form decoding.

use std::collections::HashSet;

use platform_host::{next_monotonic_timestamp_ms, random_u32, random_unit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Local-storage key holding the JSON array of notes.
pub const NOTES_STORAGE_KEY: &str = "portos.sticky_notes.v1";
/// Default note background.
pub const DEFAULT_NOTE_COLOR: &str = "#FFE58A";
/// Colors offered by the note recolor swatches.
pub const NOTE_COLORS: [&str; 5] = ["#FFE58A", "#FFB3C7", "#B8E6B8", "#A7D8FF", "#D9C2FF"];
pub const DEFAULT_NOTE_LEFT: f64 = 120.0;
pub const DEFAULT_NOTE_TOP: f64 = 120.0;
pub const DEFAULT_NOTE_WIDTH: f64 = 260.0;
pub const DEFAULT_NOTE_HEIGHT: f64 = 220.0;
pub const MIN_NOTE_WIDTH: f64 = 180.0;
pub const MIN_NOTE_HEIGHT: f64 = 120.0;
/// Id of the seeded credits note.
pub const CREDITS_NOTE_ID: &str = "note-credits";
/// Id of the seeded to-do note.
pub const TODO_NOTE_ID: &str = "note-todo";

const PREVIEW_CHARS: usize = 80;

/// A single sticky note as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNote {
    pub id: String,
    /// Trusted HTML produced by the note's editable surface.
    pub content: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub is_open: bool,
}

impl StickyNote {
    /// Creates an empty, open note with a fresh id at a slightly randomized position.
    pub fn blank() -> Self {
        Self {
            id: generate_note_id(),
            content: String::new(),
            left: DEFAULT_NOTE_LEFT + random_offset(),
            top: DEFAULT_NOTE_TOP + random_offset(),
            width: DEFAULT_NOTE_WIDTH,
            height: DEFAULT_NOTE_HEIGHT,
            color: DEFAULT_NOTE_COLOR.to_string(),
            is_open: true,
        }
    }

    /// Plain-text preview used by the notes list.
    pub fn preview(&self) -> String {
        preview_text(&self.content)
    }
}

/// Returns a new unique note id.
pub fn generate_note_id() -> String {
    format!("note-{}-{}", next_monotonic_timestamp_ms(), random_suffix())
}

// Ids stay unique without entropy: the timestamp part is monotonic and duplicates are
// dropped on load.
fn random_suffix() -> String {
    format!("{:x}", random_u32().unwrap_or_default())
}

/// Offset in `[0, 80)` for a new note. Entropy failure places it mid-range.
fn random_offset() -> f64 {
    random_unit().unwrap_or(0.5) * 80.0
}

/// Maps a stored color onto the note palette. Anything else falls back to the default color.
pub fn palette_color(color: &str) -> &'static str {
    NOTE_COLORS
        .iter()
        .copied()
        .find(|swatch| swatch.eq_ignore_ascii_case(color.trim()))
        .unwrap_or(DEFAULT_NOTE_COLOR)
}

/// Keeps the first note for every id and drops later ones. Returns how many were dropped.
pub fn drop_duplicate_ids(notes: &mut Vec<StickyNote>) -> usize {
    let before = notes.len();
    let mut seen = HashSet::new();
    notes.retain(|note| seen.insert(note.id.clone()));
    before - notes.len()
}

/// The two fixed notes every notebook carries.
pub fn seeded_notes() -> [StickyNote; 2] {
    [
        StickyNote {
            id: CREDITS_NOTE_ID.to_string(),
            content: "<b>Credits</b><br>Built with Rust, Leptos and WebAssembly.<br>\
                      Icons and wallpapers belong to their authors."
                .to_string(),
            left: 40.0,
            top: 520.0,
            width: DEFAULT_NOTE_WIDTH,
            height: 160.0,
            color: "#A7D8FF".to_string(),
            is_open: false,
        },
        StickyNote {
            id: TODO_NOTE_ID.to_string(),
            content: "<b>To-do</b><br>- icon snapping polish<br>- more projects<br>\
                      - dark wallpaper"
                .to_string(),
            left: DEFAULT_NOTE_LEFT,
            top: DEFAULT_NOTE_TOP,
            width: DEFAULT_NOTE_WIDTH,
            height: DEFAULT_NOTE_HEIGHT,
            color: DEFAULT_NOTE_COLOR.to_string(),
            is_open: true,
        },
    ]
}

/// Decodes the persisted notes list.
///
/// Anything that is not a JSON array yields an empty list. Each entry is decoded field by
/// field: a missing or mistyped field takes its default instead of discarding the record.
pub fn parse_notes(raw: &str) -> Vec<StickyNote> {
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| note_from_value(index, entry))
        .collect()
}

fn note_from_value(index: usize, entry: &Value) -> StickyNote {
    let number = |key: &str, default: f64| {
        entry
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    };
    let non_empty = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    StickyNote {
        id: non_empty("id").unwrap_or_else(|| format!("note-{index}-{}", random_suffix())),
        content: entry
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        left: number("left", DEFAULT_NOTE_LEFT),
        top: number("top", DEFAULT_NOTE_TOP),
        width: number("width", DEFAULT_NOTE_WIDTH),
        height: number("height", DEFAULT_NOTE_HEIGHT),
        color: non_empty("color")
            .map_or(DEFAULT_NOTE_COLOR, |color| palette_color(&color))
            .to_string(),
        is_open: entry.get("isOpen").and_then(Value::as_bool).unwrap_or(true),
    }
}

/// Strips markup from note HTML for list previews.
///
/// `<br>` variants become newlines, every other `<...>` tag is dropped, and the result is cut
/// to the first 80 characters. An empty result reads "Empty note".
pub fn preview_text(html: &str) -> String {
    let mut plain = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        plain.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) if end > 0 => {
                if is_line_break_tag(&after[..end]) {
                    plain.push('\n');
                }
                rest = &after[end + 1..];
            }
            _ => {
                plain.push('<');
                rest = after;
            }
        }
    }
    plain.push_str(rest);

    if plain.is_empty() {
        plain.push_str("Empty note");
    }
    plain.chars().take(PREVIEW_CHARS).collect()
}

fn is_line_break_tag(tag: &str) -> bool {
    let tag = tag.trim_end();
    let tag = tag.strip_suffix('/').unwrap_or(tag).trim_end();
    tag.eq_ignore_ascii_case("br")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_notes_defaults_each_malformed_field() {
        let raw = r##"[
            {"id":"a","content":"hi","left":"far","top":10,"width":300,"height":null,
             "color":"","isOpen":"yes"}
        ]"##;
        let notes = parse_notes(raw);

        assert_eq!(
            notes,
            vec![StickyNote {
                id: "a".to_string(),
                content: "hi".to_string(),
                left: DEFAULT_NOTE_LEFT,
                top: 10.0,
                width: 300.0,
                height: DEFAULT_NOTE_HEIGHT,
                color: DEFAULT_NOTE_COLOR.to_string(),
                is_open: true,
            }]
        );
    }

    #[test]
    fn parse_notes_replaces_colors_outside_the_palette() {
        let raw = r##"[
            {"id":"a","color":"#ffb3c7"},
            {"id":"b","color":"red;position:fixed;inset:0"},
            {"id":"c","color":"url(javascript:alert(1))"}
        ]"##;
        let colors: Vec<String> = parse_notes(raw).into_iter().map(|note| note.color).collect();
        assert_eq!(colors, vec!["#FFB3C7", DEFAULT_NOTE_COLOR, DEFAULT_NOTE_COLOR]);
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let mut notes = parse_notes(
            r#"[{"id":"a","content":"first"},{"id":"b"},{"id":"a","content":"second"}]"#,
        );
        assert_eq!(drop_duplicate_ids(&mut notes), 1);
        let kept: Vec<(&str, &str)> = notes
            .iter()
            .map(|note| (note.id.as_str(), note.content.as_str()))
            .collect();
        assert_eq!(kept, vec![("a", "first"), ("b", "")]);
        assert_eq!(drop_duplicate_ids(&mut notes), 0);
    }

    #[test]
    fn parse_notes_generates_ids_for_anonymous_records() {
        let notes = parse_notes(r#"[{"content":"x"},{"id":""},7]"#);
        assert_eq!(notes.len(), 3);
        assert!(notes[0].id.starts_with("note-0-"));
        assert!(notes[1].id.starts_with("note-1-"));
        assert!(notes[2].id.starts_with("note-2-"));
        assert_eq!(notes[2].content, "");
    }

    #[test]
    fn parse_notes_degrades_corrupt_payloads_to_empty() {
        assert!(parse_notes("{not json").is_empty());
        assert!(parse_notes(r#"{"id":"a"}"#).is_empty());
        assert!(parse_notes("").is_empty());
    }

    #[test]
    fn persisted_form_round_trips_camel_case_fields() {
        let note = seeded_notes()[1].clone();
        let raw = serde_json::to_string(&vec![note.clone()]).expect("serialize");
        assert!(raw.contains("\"isOpen\":true"));
        assert_eq!(parse_notes(&raw), vec![note]);
    }

    #[test]
    fn preview_strips_tags_and_keeps_line_breaks() {
        assert_eq!(preview_text("<b>Hi</b><br>there<BR/>you"), "Hi\nthere\nyou");
        assert_eq!(preview_text("1 < 2"), "1 < 2");
        assert_eq!(preview_text("<>"), "<>");
        assert_eq!(preview_text("<div><br></div>"), "\n");
        assert_eq!(preview_text("<i></i>"), "Empty note");
    }

    #[test]
    fn preview_is_cut_to_eighty_characters() {
        let long = "x".repeat(200);
        assert_eq!(preview_text(&long).chars().count(), 80);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_note_id();
        let b = generate_note_id();
        assert_ne!(a, b);
        assert!(a.starts_with("note-"));
    }

    #[test]
    fn blank_note_lands_in_offset_window() {
        let note = StickyNote::blank();
        assert!((120.0..200.0).contains(&note.left));
        assert!((120.0..200.0).contains(&note.top));
        assert!(note.is_open);
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);
    }
}
