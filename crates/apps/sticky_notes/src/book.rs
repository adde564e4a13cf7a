//! In-memory notebook mirrored to the preference store after every mutation.

use std::rc::Rc;

use leptos::logging;
use platform_host::{save_pref_with, PrefsStore};

use crate::model::{
    drop_duplicate_ids, palette_color, parse_notes, seeded_notes, StickyNote, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH, NOTES_STORAGE_KEY,
};

/// The full set of sticky notes plus the store they are persisted to.
#[derive(Clone)]
pub struct NoteBook {
    notes: Vec<StickyNote>,
    store: Rc<dyn PrefsStore>,
}

impl std::fmt::Debug for NoteBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteBook")
            .field("notes", &self.notes)
            .finish_non_exhaustive()
    }
}

impl NoteBook {
    /// Loads the persisted notes and makes sure both seeded notes exist.
    ///
    /// A failing store is logged and treated as empty. Records repeating an earlier id are
    /// dropped. When either step changed the list it is written back immediately.
    pub fn load(store: Rc<dyn PrefsStore>) -> Self {
        let mut notes = match store.load_pref(NOTES_STORAGE_KEY) {
            Ok(Some(raw)) => parse_notes(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                logging::warn!("sticky notes load failed: {err}");
                Vec::new()
            }
        };
        let dropped = drop_duplicate_ids(&mut notes);
        if dropped > 0 {
            logging::warn!("sticky notes: dropped {dropped} record(s) with a repeated id");
        }
        let mut book = Self { notes, store };
        if book.seed_defaults() || dropped > 0 {
            book.persist();
        }
        book
    }

    /// Inserts any seeded note whose id is missing. Returns whether anything was added.
    pub fn seed_defaults(&mut self) -> bool {
        let mut added = false;
        for seed in seeded_notes() {
            if self.get(&seed.id).is_none() {
                self.notes.push(seed);
                added = true;
            }
        }
        added
    }

    pub fn notes(&self) -> &[StickyNote] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&StickyNote> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Ids of notes whose window should be showing, in list order.
    pub fn open_note_ids(&self) -> Vec<String> {
        self.notes
            .iter()
            .filter(|note| note.is_open)
            .map(|note| note.id.clone())
            .collect()
    }

    /// Appends a blank open note and returns its id.
    pub fn create(&mut self) -> String {
        let note = StickyNote::blank();
        let id = note.id.clone();
        self.notes.push(note);
        self.persist();
        id
    }

    pub fn set_content(&mut self, id: &str, content: String) {
        self.mutate(id, |note| note.content = content);
    }

    pub fn move_to(&mut self, id: &str, left: f64, top: f64) {
        self.mutate(id, |note| {
            note.left = left;
            note.top = top;
        });
    }

    /// Resizes a note, never below the minimum note size.
    pub fn resize(&mut self, id: &str, width: f64, height: f64) {
        self.mutate(id, |note| {
            note.width = width.max(MIN_NOTE_WIDTH);
            note.height = height.max(MIN_NOTE_HEIGHT);
        });
    }

    /// Recolors a note. Colors outside the palette become the default color.
    pub fn set_color(&mut self, id: &str, color: &str) {
        self.mutate(id, |note| note.color = palette_color(color).to_string());
    }

    pub fn set_open(&mut self, id: &str, open: bool) {
        self.mutate(id, |note| note.is_open = open);
    }

    /// Flips a note between shown and hidden. Returns the new state, or `None` for an unknown id.
    pub fn toggle_open(&mut self, id: &str) -> Option<bool> {
        let open = !self.get(id)?.is_open;
        self.set_open(id, open);
        Some(open)
    }

    /// Removes a note for good. Returns whether a note with that id existed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn mutate(&mut self, id: &str, apply: impl FnOnce(&mut StickyNote)) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };
        apply(note);
        self.persist();
    }

    /// Writes the full list to the store. Failures are logged and otherwise ignored.
    pub fn persist(&self) {
        if let Err(err) = save_pref_with(self.store.as_ref(), NOTES_STORAGE_KEY, &self.notes) {
            logging::warn!("sticky notes save failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{CREDITS_NOTE_ID, TODO_NOTE_ID};

    fn book_with(store: &MemoryPrefsStore) -> NoteBook {
        NoteBook::load(Rc::new(store.clone()))
    }

    fn ids(book: &NoteBook) -> Vec<String> {
        book.notes().iter().map(|note| note.id.clone()).collect()
    }

    #[test]
    fn first_load_seeds_and_persists_both_fixed_notes() {
        let store = MemoryPrefsStore::default();
        let book = book_with(&store);

        assert_eq!(ids(&book), vec![CREDITS_NOTE_ID, TODO_NOTE_ID]);
        assert_eq!(book.open_note_ids(), vec![TODO_NOTE_ID.to_string()]);
        let raw = store.raw(NOTES_STORAGE_KEY).expect("seeds persisted");
        assert_eq!(parse_notes(&raw), book.notes().to_vec());
    }

    #[test]
    fn seeding_is_idempotent() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        assert!(!book.seed_defaults());
        let reloaded = book_with(&store);
        assert_eq!(reloaded.notes().len(), 2);
    }

    #[test]
    fn edits_are_written_through_immediately() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        let id = book.create();
        book.set_content(&id, "<b>hello</b>".to_string());
        book.move_to(&id, 10.0, 20.0);
        book.set_color(&id, "#B8E6B8");

        let reloaded = book_with(&store);
        let note = reloaded.get(&id).expect("created note persisted");
        assert_eq!(note.content, "<b>hello</b>");
        assert_eq!((note.left, note.top), (10.0, 20.0));
        assert_eq!(note.color, "#B8E6B8");
        assert!(note.is_open);
    }

    #[test]
    fn resize_respects_minimum_size() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        book.resize(TODO_NOTE_ID, 20.0, 500.0);
        let note = book.get(TODO_NOTE_ID).expect("todo note");
        assert_eq!((note.width, note.height), (MIN_NOTE_WIDTH, 500.0));
    }

    #[test]
    fn deleted_user_note_stays_gone_after_reload() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        let id = book.create();
        assert!(book.delete(&id));
        assert!(!book.delete(&id));

        let reloaded = book_with(&store);
        assert!(reloaded.get(&id).is_none());
    }

    #[test]
    fn deleting_an_open_note_closes_its_window() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        let id = book.create();
        assert!(book.open_note_ids().contains(&id));

        assert!(book.delete(&id));
        assert_eq!(book.open_note_ids(), vec![TODO_NOTE_ID.to_string()]);
        assert!(!book.notes().iter().any(|note| note.id == id));
        let raw = store.raw(NOTES_STORAGE_KEY).expect("notes persisted");
        assert!(!raw.contains(&id));
    }

    #[test]
    fn repeated_ids_in_storage_load_as_one_note() {
        let store = MemoryPrefsStore::default();
        store
            .save_pref(
                NOTES_STORAGE_KEY,
                r#"[{"id":"a","content":"first"},{"id":"a","content":"second"}]"#,
            )
            .expect("memory store write");

        let mut book = book_with(&store);
        assert_eq!(book.open_note_ids(), vec!["a".to_string(), TODO_NOTE_ID.to_string()]);

        book.set_content("a", "edited".to_string());
        let reloaded = book_with(&store);
        let copies: Vec<&StickyNote> =
            reloaded.notes().iter().filter(|note| note.id == "a").collect();
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].content, "edited");
    }

    #[test]
    fn recolor_outside_palette_uses_default() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        book.set_color(TODO_NOTE_ID, "#D9C2FF");
        assert_eq!(book.get(TODO_NOTE_ID).map(|note| note.color.as_str()), Some("#D9C2FF"));
        book.set_color(TODO_NOTE_ID, "black;display:none");
        assert_eq!(
            book.get(TODO_NOTE_ID).map(|note| note.color.as_str()),
            Some(crate::model::DEFAULT_NOTE_COLOR)
        );
    }

    #[test]
    fn deleted_seed_note_returns_on_next_load() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        assert!(book.delete(CREDITS_NOTE_ID));
        assert!(book.get(CREDITS_NOTE_ID).is_none());

        let reloaded = book_with(&store);
        assert!(reloaded.get(CREDITS_NOTE_ID).is_some());
    }

    #[test]
    fn toggle_flips_visibility_and_ignores_unknown_ids() {
        let store = MemoryPrefsStore::default();
        let mut book = book_with(&store);
        assert_eq!(book.toggle_open(CREDITS_NOTE_ID), Some(true));
        assert_eq!(book.toggle_open(CREDITS_NOTE_ID), Some(false));
        assert_eq!(book.toggle_open("note-missing"), None);
    }

    #[test]
    fn corrupt_store_falls_back_to_seeds() {
        let store = MemoryPrefsStore::default();
        store
            .save_pref(NOTES_STORAGE_KEY, "{broken")
            .expect("memory store write");
        let book = book_with(&store);
        assert_eq!(ids(&book), vec![CREDITS_NOTE_ID, TODO_NOTE_ID]);
    }
}
