use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;
/// Grid of the default 1280x800 viewport; every icon must fit it.
const MAX_COLUMNS: u32 = 12;
const MAX_ROWS: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ContentSpec {
    Text { html: String },
    Website { url: String },
    Pdf { url: String },
    Devlog,
    StickyNotes,
    Console,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppSpec {
    id: String,
    title: String,
    label: String,
    #[serde(default)]
    image: Option<String>,
    col: u32,
    row: u32,
    #[serde(default)]
    pinned: bool,
    content: ContentSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DevlogPostSpec {
    id: String,
    title: String,
    date: String,
    body_html: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    apps: Vec<AppSpec>,
    #[serde(default)]
    devlog: Vec<DevlogPostSpec>,
}

#[derive(Debug, Serialize)]
struct CatalogOut<'a> {
    apps: &'a [AppSpec],
    devlog: &'a [DevlogPostSpec],
}

fn is_slug(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= 64
        && raw.split('.').all(|part| {
            let bytes = part.as_bytes();
            !part.is_empty()
                && bytes[0].is_ascii_lowercase()
                && !part.ends_with('-')
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        })
}

fn validate(catalog: &CatalogFile) {
    if catalog.schema_version != SCHEMA_VERSION {
        panic!(
            "app catalog schema mismatch: expected {SCHEMA_VERSION} found {}",
            catalog.schema_version
        );
    }

    let mut ids = HashSet::new();
    let mut cells = HashSet::new();
    for app in &catalog.apps {
        if !is_slug(&app.id) {
            panic!("app id `{}` is not a lowercase slug", app.id);
        }
        if !ids.insert(app.id.as_str()) {
            panic!("duplicate app id `{}`", app.id);
        }
        if app.col >= MAX_COLUMNS || app.row >= MAX_ROWS {
            panic!(
                "app `{}` cell ({}, {}) is outside the {MAX_COLUMNS}x{MAX_ROWS} grid",
                app.id, app.col, app.row
            );
        }
        if !cells.insert((app.col, app.row)) {
            panic!(
                "app `{}` shares cell ({}, {}) with another icon",
                app.id, app.col, app.row
            );
        }
        let empty_source = match &app.content {
            ContentSpec::Text { html } => html.trim().is_empty(),
            ContentSpec::Website { url } | ContentSpec::Pdf { url } => url.trim().is_empty(),
            ContentSpec::Devlog | ContentSpec::StickyNotes | ContentSpec::Console => false,
        };
        if empty_source {
            panic!("app `{}` has an empty content source", app.id);
        }
    }

    let mut post_ids = HashSet::new();
    for post in &catalog.devlog {
        if !post_ids.insert(post.id.as_str()) {
            panic!("duplicate devlog post id `{}`", post.id);
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("apps.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: CatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog);

    let json = serde_json::to_string_pretty(&CatalogOut {
        apps: &catalog.apps,
        devlog: &catalog.devlog,
    })
    .expect("serialize app catalog");
    if json.contains("\"##") {
        panic!("app catalog content must not contain `\"##`");
    }
    let generated = format!(
        "/// Build-time generated app catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
