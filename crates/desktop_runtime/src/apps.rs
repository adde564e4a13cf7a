//! App catalog and router.
//!
//! The catalog is authored in `apps.toml`, validated by the build script and embedded as JSON.
//! [`route`] maps an application id to what opening it means.

use std::sync::OnceLock;

use desktop_app_contract::{AppContent, ApplicationId};
use leptos::logging::error;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    desktop_icons::DesktopIcon,
    devlog::{self, DevlogPost},
    geometry::GridCell,
    model::OpenWindowRequest,
};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("app catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidAppId(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawContent {
    Text { html: String },
    Website { url: String },
    Pdf { url: String },
    Devlog,
    StickyNotes,
    Console,
}

#[derive(Debug, Deserialize)]
struct RawApp {
    id: String,
    title: String,
    label: String,
    #[serde(default)]
    image: Option<String>,
    col: u32,
    row: u32,
    #[serde(default)]
    pinned: bool,
    content: RawContent,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    apps: Vec<RawApp>,
    #[serde(default)]
    devlog: Vec<DevlogPost>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCatalogEntry {
    pub app_id: ApplicationId,
    pub title: String,
    pub label: String,
    pub image: Option<String>,
    pub cell: GridCell,
    pub pinned: bool,
    pub content: AppContent,
}

impl AppCatalogEntry {
    pub fn icon_id(&self) -> String {
        format!("icon-{}", self.app_id)
    }
}

/// What activating an application does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// Open, or toggle, the app's managed window.
    Window(OpenWindowRequest),
    /// Show the sticky-notes list overlay.
    NotesList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppCatalog {
    entries: Vec<AppCatalogEntry>,
}

impl AppCatalog {
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(raw)?;
        let feed = devlog::render_feed(&raw.devlog);
        let entries = raw
            .apps
            .into_iter()
            .map(|app| {
                let content = match app.content {
                    RawContent::Text { html } => AppContent::Text { html },
                    RawContent::Website { url } => AppContent::Website { url },
                    RawContent::Pdf { url } => AppContent::Pdf { url },
                    RawContent::Devlog => AppContent::Text { html: feed.clone() },
                    RawContent::StickyNotes => AppContent::StickyNotes,
                    RawContent::Console => AppContent::Console,
                };
                Ok(AppCatalogEntry {
                    app_id: ApplicationId::new(app.id).map_err(CatalogError::InvalidAppId)?,
                    title: app.title,
                    label: app.label,
                    image: app.image,
                    cell: GridCell::new(app.col, app.row),
                    pinned: app.pinned,
                    content,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AppCatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, app_id: &ApplicationId) -> Option<&AppCatalogEntry> {
        self.entries.iter().find(|entry| &entry.app_id == app_id)
    }

    pub fn desktop_icons(&self) -> Vec<DesktopIcon> {
        self.entries
            .iter()
            .map(|entry| DesktopIcon {
                id: entry.icon_id(),
                app_id: entry.app_id.clone(),
                label: entry.label.clone(),
                image: entry.image.clone(),
                cell: entry.cell,
                pinned: entry.pinned,
            })
            .collect()
    }

    /// Unknown ids route to a placeholder window titled with the id.
    pub fn route(&self, app_id: &ApplicationId) -> AppRoute {
        match self.entry(app_id) {
            Some(entry) if entry.content == AppContent::StickyNotes => AppRoute::NotesList,
            Some(entry) => AppRoute::Window(OpenWindowRequest {
                app_id: entry.app_id.clone(),
                title: entry.title.clone(),
                content: entry.content.clone(),
            }),
            None => AppRoute::Window(OpenWindowRequest {
                app_id: app_id.clone(),
                title: app_id.to_string(),
                content: AppContent::placeholder(),
            }),
        }
    }
}

/// The catalog embedded at build time.
pub fn app_catalog() -> &'static AppCatalog {
    static CATALOG: OnceLock<AppCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        AppCatalog::parse(APP_CATALOG_JSON).unwrap_or_else(|err| {
            error!("failed to load app catalog: {err}");
            AppCatalog::default()
        })
    })
}

pub fn desktop_icons() -> Vec<DesktopIcon> {
    app_catalog().desktop_icons()
}

pub fn route(app_id: &ApplicationId) -> AppRoute {
    app_catalog().route(app_id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn id(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    #[test]
    fn bundled_catalog_parses() {
        let catalog = AppCatalog::parse(APP_CATALOG_JSON).expect("bundled catalog");
        let ids: Vec<&str> = catalog
            .entries()
            .iter()
            .map(|entry| entry.app_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["about", "projects", "contact", "playground", "devlog", "resume", "notes", "console"]
        );
    }

    #[test]
    fn icons_follow_catalog_cells() {
        let icons = desktop_icons();
        let about = icons.iter().find(|icon| icon.id == "icon-about");
        assert_eq!(about.map(|icon| (icon.cell, icon.pinned)), Some((GridCell::new(0, 0), true)));
        let playground = icons.iter().find(|icon| icon.app_id == id("playground"));
        assert_eq!(playground.map(|icon| icon.cell), Some(GridCell::new(1, 0)));
    }

    #[test]
    fn routes_website_app_to_window() {
        assert_eq!(
            route(&id("playground")),
            AppRoute::Window(OpenWindowRequest {
                app_id: id("playground"),
                title: "Playground".to_string(),
                content: AppContent::Website {
                    url: "https://inner-portfolio-js.vercel.app/".to_string()
                },
            })
        );
    }

    #[test]
    fn notes_app_routes_to_list() {
        assert_eq!(route(&id("notes")), AppRoute::NotesList);
    }

    #[test]
    fn console_app_routes_to_window() {
        assert_eq!(
            route(&id("console")),
            AppRoute::Window(OpenWindowRequest {
                app_id: id("console"),
                title: "Console".to_string(),
                content: AppContent::Console,
            })
        );
    }

    #[test]
    fn unknown_app_gets_placeholder() {
        let AppRoute::Window(request) = route(&id("paint")) else {
            panic!("expected a window route");
        };
        assert_eq!(request.title, "paint");
        assert_eq!(request.content, AppContent::placeholder());
    }

    #[test]
    fn devlog_renders_posts_into_text_window() {
        let AppRoute::Window(request) = route(&id("devlog")) else {
            panic!("expected a window route");
        };
        let AppContent::Text { html } = request.content else {
            panic!("expected text content");
        };
        assert!(html.contains("Dev Log app shipped"));
        assert!(html.contains("Dec 13, 2025"));
    }

    #[test]
    fn rejects_invalid_ids() {
        let raw = r#"{"apps":[{"id":"Bad Id","title":"x","label":"x","col":0,"row":0,
            "content":{"kind":"sticky_notes"}}]}"#;
        assert!(matches!(
            AppCatalog::parse(raw),
            Err(CatalogError::InvalidAppId(_))
        ));
        assert!(matches!(
            AppCatalog::parse("{"),
            Err(CatalogError::Parse(_))
        ));
    }
}
