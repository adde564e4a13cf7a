//! Stacking order for note windows and the notes list.

use std::collections::HashMap;

/// First z-index handed out; keeps notes above desktop windows.
pub const NOTES_BASE_Z: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStack {
    next_z: u32,
    notes: HashMap<String, u32>,
    list: u32,
}

impl Default for NoteStack {
    fn default() -> Self {
        Self {
            next_z: NOTES_BASE_Z + 1,
            notes: HashMap::new(),
            list: NOTES_BASE_Z,
        }
    }
}

impl NoteStack {
    /// Current z-index for a note. Notes never raised sit at the base.
    pub fn note_z(&self, id: &str) -> u32 {
        self.notes.get(id).copied().unwrap_or(NOTES_BASE_Z)
    }

    pub fn list_z(&self) -> u32 {
        self.list
    }

    /// Raises a note above everything else in the notes layer.
    pub fn bring_to_front(&mut self, id: &str) -> u32 {
        let z = self.take_next();
        self.notes.insert(id.to_string(), z);
        z
    }

    pub fn bring_list_to_front(&mut self) -> u32 {
        let z = self.take_next();
        self.list = z;
        z
    }

    pub fn forget(&mut self, id: &str) {
        self.notes.remove(id);
    }

    fn take_next(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }
}
