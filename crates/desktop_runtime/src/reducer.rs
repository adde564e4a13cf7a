//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::ApplicationId;
use thiserror::Error;

use crate::{
    apps::{self, AppRoute},
    desktop_icons::{exceeds_drag_threshold, resolve_icon_drop, IconDropReport},
    events::WindowLifecycleEvent,
    geometry::{
        clamp_icon_position, grid_to_pixel, pixel_to_grid, GridLayout, LayerSize, PixelPoint,
        CELL_SIZE,
    },
    model::{
        DesktopState, DragSession, IconDragSession, InteractionState, OpenWindowRequest,
        PointerPosition, ResizeEdge, ResizeSession, WindowId, WindowRecord,
    },
    window_manager::{
        bring_to_front, default_window_rect, maximized_rect, moved_rect, resized_rect,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app through the catalog router (icon double-click, taskbar, deep link).
    ActivateApp { app_id: ApplicationId },
    /// Open an app, or restore and raise its window; never minimizes (console `open`).
    LaunchApp { app_id: ApplicationId },
    /// Open or toggle a window for an already-resolved request.
    OpenWindow(OpenWindowRequest),
    CloseWindow { window_id: WindowId },
    /// Raise a window (pointer-down anywhere in its frame).
    FocusWindow { window_id: WindowId },
    MinimizeWindow { window_id: WindowId },
    /// Un-minimize a window and raise it.
    RestoreWindow { window_id: WindowId },
    /// Maximize, or return a maximized window to its saved bounds.
    ToggleMaximize { window_id: WindowId },
    BeginMove {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    UpdateMove { pointer: PointerPosition },
    EndMove,
    BeginResize {
        window_id: WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    },
    UpdateResize { pointer: PointerPosition },
    EndResize,
    /// Browser viewport changed.
    SetViewport { width: i32, height: i32 },
    /// Highlight an icon, or clear the highlight with `None`.
    SelectIcon { icon_id: Option<String> },
    /// Pointer went down on an icon.
    PressIcon {
        icon_id: String,
        pointer: PointerPosition,
    },
    /// Pointer moved while an icon is pressed.
    DragIcon { pointer: PointerPosition },
    /// Pointer released over the desktop; resolves the drop if the press became a drag.
    ReleaseIcon,
    /// Pointer capture lost mid-drag; the icon keeps its cell.
    CancelIconDrag,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Publish on the lifecycle bus.
    Lifecycle(WindowLifecycleEvent),
    /// Show the sticky-notes list overlay.
    OpenNotesList,
    /// Log how an icon drop was resolved.
    IconDropResolved(IconDropReport),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference something no longer on the desktop.
pub enum ReducerError {
    #[error("window {0:?} not found")]
    WindowNotFound(WindowId),
    #[error("desktop icon `{0}` not found")]
    IconNotFound(String),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a window or icon that is not present.
/// The state is left unchanged in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::ActivateApp { app_id } => match apps::route(&app_id) {
            AppRoute::NotesList => effects.push(RuntimeEffect::OpenNotesList),
            AppRoute::Window(request) => {
                activate_window(state, interaction, request, true, &mut effects)?;
            }
        },
        DesktopAction::LaunchApp { app_id } => match apps::route(&app_id) {
            AppRoute::NotesList => effects.push(RuntimeEffect::OpenNotesList),
            AppRoute::Window(request) => {
                activate_window(state, interaction, request, false, &mut effects)?;
            }
        },
        DesktopAction::OpenWindow(request) => {
            activate_window(state, interaction, request, true, &mut effects)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            let index = state
                .windows
                .iter()
                .position(|w| w.id == window_id)
                .ok_or(ReducerError::WindowNotFound(window_id))?;
            let window = state.windows.remove(index);
            interaction.clear_window(window_id);
            effects.push(RuntimeEffect::Lifecycle(WindowLifecycleEvent::Closed {
                window_id,
                app_id: window.app_id,
            }));
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window(state, window_id, &mut effects)?;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            minimize_window(state, interaction, window_id, &mut effects)?;
        }
        DesktopAction::RestoreWindow { window_id } => {
            restore_window(state, window_id, &mut effects)?;
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let layer = state.desktop_area;
            let window = find_window_mut(state, window_id)?;
            if window.maximized {
                if let Some(rect) = window.restore_rect.take() {
                    window.rect = rect;
                }
                window.maximized = false;
            } else {
                window.restore_rect = Some(window.rect);
                window.rect = maximized_rect(layer);
                window.maximized = true;
            }
            interaction.clear_window(window_id);
            focus_window(state, window_id, &mut effects)?;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            focus_window(state, window_id, &mut effects)?;
            let window = find_window(state, window_id)?;
            // Titlebar drag is ignored while maximized.
            if !window.maximized {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start: window.rect,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.clone() {
                let layer = state.desktop_area;
                let (dx, dy) = pointer.delta_from(session.pointer_start);
                find_window_mut(state, session.window_id)?.rect =
                    moved_rect(session.rect_start, dx, dy, layer);
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            focus_window(state, window_id, &mut effects)?;
            let window = find_window(state, window_id)?;
            if !window.maximized {
                interaction.resizing = Some(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start: window.rect,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.clone() {
                let layer = state.desktop_area;
                let (dx, dy) = pointer.delta_from(session.pointer_start);
                find_window_mut(state, session.window_id)?.rect =
                    resized_rect(session.rect_start, session.edge, dx, dy, layer);
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::SetViewport { width, height } => {
            let area = LayerSize::desktop_area(width, height);
            if area != state.desktop_area {
                apply_desktop_area(state, area);
            }
        }
        DesktopAction::SelectIcon { icon_id } => {
            state.selected_icon = icon_id;
        }
        DesktopAction::PressIcon { icon_id, pointer } => {
            let cell = state
                .icon(&icon_id)
                .ok_or_else(|| ReducerError::IconNotFound(icon_id.clone()))?
                .cell;
            let origin = grid_to_pixel(cell);
            state.selected_icon = Some(icon_id.clone());
            interaction.icon_drag = Some(IconDragSession {
                icon_id,
                pointer_start: pointer,
                origin,
                position: origin,
                moved: false,
            });
        }
        DesktopAction::DragIcon { pointer } => {
            let area = state.desktop_area;
            if let Some(session) = interaction.icon_drag.as_mut() {
                let (dx, dy) = pointer.delta_from(session.pointer_start);
                if !session.moved && exceeds_drag_threshold(dx, dy) {
                    session.moved = true;
                }
                if session.moved {
                    let raw = PixelPoint {
                        x: session.origin.x + f64::from(dx),
                        y: session.origin.y + f64::from(dy),
                    };
                    session.position = clamp_icon_position(raw, area);
                }
            }
        }
        DesktopAction::ReleaseIcon => {
            // A press that never crossed the threshold stays a click.
            let Some(session) = interaction.icon_drag.take().filter(|s| s.moved) else {
                return Ok(effects);
            };
            let icon = state
                .icon(&session.icon_id)
                .ok_or_else(|| ReducerError::IconNotFound(session.icon_id.clone()))?;
            let (label, start) = (icon.label.clone(), icon.cell);
            let layout = state.layout;
            let center = PixelPoint {
                x: session.position.x + CELL_SIZE / 2.0,
                y: session.position.y + CELL_SIZE / 2.0,
            };
            let target = pixel_to_grid(center, layout);
            let outcome =
                resolve_icon_drop(&mut state.icons, &session.icon_id, start, target, layout);
            effects.push(RuntimeEffect::IconDropResolved(IconDropReport {
                label,
                target,
                outcome,
            }));
        }
        DesktopAction::CancelIconDrag => {
            interaction.icon_drag = None;
        }
    }
    Ok(effects)
}

fn find_window(state: &DesktopState, window_id: WindowId) -> Result<&WindowRecord, ReducerError> {
    state
        .window(window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

/// One window per app: a running app toggles between minimized and restored.
fn activate_window(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    request: OpenWindowRequest,
    toggle: bool,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let running = state
        .window_for_app(&request.app_id)
        .map(|w| (w.id, w.minimized));
    match running {
        Some((window_id, true)) => restore_window(state, window_id, effects),
        Some((window_id, false)) if toggle => {
            minimize_window(state, interaction, window_id, effects)
        }
        Some((window_id, false)) => focus_window(state, window_id, effects),
        None => {
            let window_id = next_window_id(state);
            let app_id = request.app_id.clone();
            state.windows.push(WindowRecord {
                id: window_id,
                app_id: request.app_id,
                title: request.title,
                content: request.content,
                rect: default_window_rect(state.desktop_area),
                restore_rect: None,
                z_index: 0,
                minimized: false,
                maximized: false,
            });
            bring_to_front(state, window_id);
            effects.push(RuntimeEffect::Lifecycle(WindowLifecycleEvent::Opened {
                window_id,
                app_id,
            }));
            Ok(())
        }
    }
}

fn focus_window(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let app_id = find_window(state, window_id)?.app_id.clone();
    if state.top_window_id() == Some(window_id) {
        return Ok(());
    }
    bring_to_front(state, window_id);
    effects.push(RuntimeEffect::Lifecycle(WindowLifecycleEvent::Focused {
        window_id,
        app_id,
    }));
    Ok(())
}

fn minimize_window(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = find_window_mut(state, window_id)?;
    if !window.minimized {
        window.minimized = true;
        effects.push(RuntimeEffect::Lifecycle(WindowLifecycleEvent::Minimized {
            window_id,
            app_id: window.app_id.clone(),
        }));
    }
    interaction.clear_window(window_id);
    Ok(())
}

fn restore_window(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = find_window_mut(state, window_id)?;
    if !window.minimized {
        return focus_window(state, window_id, effects);
    }
    window.minimized = false;
    let app_id = window.app_id.clone();
    bring_to_front(state, window_id);
    effects.push(RuntimeEffect::Lifecycle(WindowLifecycleEvent::Restored {
        window_id,
        app_id,
    }));
    Ok(())
}

/// Re-lays the grid and refits windows after the desktop area changed size.
fn apply_desktop_area(state: &mut DesktopState, area: LayerSize) {
    state.desktop_area = area;
    state.layout = GridLayout::for_area(area);
    state.clamp_icons_to_layout();
    for window in &mut state.windows {
        window.rect = if window.maximized {
            maximized_rect(area)
        } else {
            moved_rect(window.rect, 0, 0, area)
        };
    }
}
