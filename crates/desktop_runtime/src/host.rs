//! Browser environment queries for the desktop runtime: viewport size and deep links.

use desktop_app_contract::ApplicationId;
use leptos::logging;

use crate::model::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// Current browser viewport size, or the default size off-browser.
pub fn viewport_size() -> (i32, i32) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback| {
                value
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback)
            };
            return (
                read(window.inner_width(), DEFAULT_VIEWPORT_WIDTH),
                read(window.inner_height(), DEFAULT_VIEWPORT_HEIGHT),
            );
        }
    }

    (DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
}

/// Parses `?open=<id>[,<id>...]` into app ids, in order and without duplicates.
///
/// Ids that are not valid slugs are logged and skipped.
pub fn parse_open_query(query: &str) -> Vec<ApplicationId> {
    let mut apps = Vec::<ApplicationId>::new();
    for pair in query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
    {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != "open" {
            continue;
        }
        let value = value.replace("%2C", ",").replace("%2c", ",");
        for raw in value.split(',').map(str::trim).filter(|raw| !raw.is_empty()) {
            match ApplicationId::new(raw) {
                Ok(app_id) if !apps.contains(&app_id) => apps.push(app_id),
                Ok(_) => {}
                Err(err) => logging::warn!("ignoring deep link: {err}"),
            }
        }
    }
    apps
}

/// Apps requested by the current page URL.
pub fn current_deep_link_apps() -> Vec<ApplicationId> {
    #[cfg(target_arch = "wasm32")]
    {
        let search = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default();
        parse_open_query(&search)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Vec::new()
    }
}
