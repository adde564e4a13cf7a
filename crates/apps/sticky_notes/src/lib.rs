//! Sticky notes: a locally persisted notebook with free-floating note windows and a list
//! window that toggles, creates and deletes them.

#![warn(rustdoc::broken_intra_doc_links)]

pub mod book;
mod components;
pub mod model;
mod stack;

pub use book::NoteBook;
pub use components::{provide_sticky_notes, use_sticky_notes, StickyNotesContext, StickyNotesLayer};
pub use model::{StickyNote, NOTES_STORAGE_KEY};
pub use stack::{NoteStack, NOTES_BASE_Z};
