//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Native builds compile the same adapters with inert fallbacks so runtime crates and their
//! tests do not need a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod pointer_capture;
pub mod storage;

pub use adapters::prefs_store;
pub use pointer_capture::PointerCaptureGuard;
pub use storage::local_prefs::WebPrefsStore;
