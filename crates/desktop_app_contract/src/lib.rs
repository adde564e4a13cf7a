//! Shared contract types between the desktop window manager runtime and the apps it hosts.
//!
//! Applications are addressed by canonical string identifiers ([`ApplicationId`]) and
//! described by a tagged content descriptor ([`AppContent`]) that tells the window shell
//! how to fill a window body.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Stable identifier for an application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lowercase slug (`a-z`, `0-9`, `-`, `.`).
    ///
    /// # Errors
    ///
    /// Returns a description of the violated rule when `raw` is not a valid slug.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected a lowercase slug"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    raw.split('.').all(|part| {
        let bytes = part.as_bytes();
        !part.is_empty()
            && bytes[0].is_ascii_lowercase()
            && !part.ends_with('-')
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    })
}

/// Content descriptor for an application window body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppContent {
    /// Inline, trusted HTML fragment authored with the site.
    Text {
        /// HTML body rendered inside the window.
        html: String,
    },
    /// External page embedded in an iframe.
    Website {
        /// Page URL.
        url: String,
    },
    /// Document embedded through the browser's PDF viewer.
    Pdf {
        /// Document URL.
        url: String,
    },
    /// The sticky-notes list overlay, which manages its own windows.
    StickyNotes,
    /// Command prompt that lists and opens other apps.
    Console,
}

impl AppContent {
    /// Stable name of the content kind, used as a CSS hook.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Website { .. } => "website",
            Self::Pdf { .. } => "pdf",
            Self::StickyNotes => "sticky_notes",
            Self::Console => "console",
        }
    }

    /// Placeholder body shown for application ids without a catalog entry.
    pub fn placeholder() -> Self {
        Self::Text {
            html: "<p>This app isn't wired up yet.</p>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn application_id_accepts_slugs_and_rejects_noise() {
        assert!(ApplicationId::new("about").is_ok());
        assert!(ApplicationId::new("dev-log").is_ok());
        assert!(ApplicationId::new("portos.resume2").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("About").is_err());
        assert!(ApplicationId::new("trailing-").is_err());
        assert!(ApplicationId::new("two..dots").is_err());
        assert!(ApplicationId::new("9lives").is_err());
    }

    #[test]
    fn content_descriptor_uses_kind_tag() {
        let content: AppContent =
            serde_json::from_str(r#"{"kind":"website","url":"https://example.com/"}"#)
                .expect("parse website content");
        assert_eq!(
            content,
            AppContent::Website {
                url: "https://example.com/".to_string()
            }
        );
        assert_eq!(content.kind_name(), "website");

        let notes: AppContent =
            serde_json::from_str(r#"{"kind":"sticky_notes"}"#).expect("parse notes content");
        assert_eq!(notes, AppContent::StickyNotes);

        let console: AppContent =
            serde_json::from_str(r#"{"kind":"console"}"#).expect("parse console content");
        assert_eq!(console, AppContent::Console);
        assert_eq!(console.kind_name(), "console");
    }

    #[test]
    fn application_id_serializes_as_plain_string() {
        let raw = serde_json::to_string(&ApplicationId::trusted("contact")).expect("serialize");
        assert_eq!(raw, "\"contact\"");
    }
}
