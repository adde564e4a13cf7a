//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the preference
//! storage contract and time/randomness helpers, while concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::prefs::{save_pref_with, MemoryPrefsStore, PrefsStore};
pub use time::{next_monotonic_timestamp_ms, random_u32, random_unit, unix_time_ms_now};
