//! Taskbar button derivation: which apps get a button and how each one looks.

use chrono::{Local, Timelike};
use desktop_app_contract::ApplicationId;

use crate::{desktop_icons::DesktopIcon, model::WindowRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskbarButtonState {
    /// Pinned but not running.
    Idle,
    /// Running and visible.
    Active,
    Minimized,
}

impl TaskbarButtonState {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Idle => "taskbar__app-icon",
            Self::Active => "taskbar__app-icon taskbar__app-icon--active",
            Self::Minimized => {
                "taskbar__app-icon taskbar__app-icon--active taskbar__app-icon--minimized"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub app_id: ApplicationId,
    pub label: String,
    pub image: Option<String>,
    pub state: TaskbarButtonState,
}

impl TaskbarEntry {
    /// Single-letter glyph shown when the entry has no image.
    pub fn glyph(&self) -> String {
        self.label
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Pinned apps plus running apps, in icon order, followed by running apps that have no icon
/// (in window order).
pub fn taskbar_entries(icons: &[DesktopIcon], windows: &[WindowRecord]) -> Vec<TaskbarEntry> {
    let state_of = |app_id: &ApplicationId| {
        windows
            .iter()
            .find(|w| &w.app_id == app_id)
            .map(|w| {
                if w.minimized {
                    TaskbarButtonState::Minimized
                } else {
                    TaskbarButtonState::Active
                }
            })
            .unwrap_or(TaskbarButtonState::Idle)
    };

    let mut entries: Vec<TaskbarEntry> = icons
        .iter()
        .filter_map(|icon| {
            let state = state_of(&icon.app_id);
            (icon.pinned || state != TaskbarButtonState::Idle).then(|| TaskbarEntry {
                app_id: icon.app_id.clone(),
                label: icon.label.clone(),
                image: icon.image.clone(),
                state,
            })
        })
        .collect();

    for window in windows {
        if entries.iter().any(|entry| entry.app_id == window.app_id) {
            continue;
        }
        entries.push(TaskbarEntry {
            app_id: window.app_id.clone(),
            label: window.title.clone(),
            image: None,
            state: state_of(&window.app_id),
        });
    }
    entries
}

/// `HH:MM` for the taskbar clock.
pub fn format_clock(hours: u32, minutes: u32) -> String {
    format!("{:02}:{:02}", hours % 24, minutes % 60)
}

/// Local wall-clock hours and minutes.
pub fn local_clock_now() -> (u32, u32) {
    let now = Local::now();
    (now.hour(), now.minute())
}
