//! Desktop-style portfolio runtime: window manager, icon grid, taskbar and the Leptos shell.
//!
//! State transitions live in [`reducer`] and are free of DOM access; [`components`] renders the
//! state and turns pointer input into [`DesktopAction`] values.

pub mod apps;
pub mod components;
pub mod desktop_icons;
pub mod devlog;
mod effect_executor;
pub mod events;
pub mod follower;
pub mod geometry;
mod gesture;
pub mod host;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod taskbar;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
