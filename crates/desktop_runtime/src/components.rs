//! Desktop shell UI composition and interaction surfaces.

mod follower;
mod icons;
mod taskbar;
mod window;

use desktop_app_sticky_notes::StickyNotesLayer;
use leptos::*;

use self::{follower::DuckFollower, icons::DesktopIconLayer, taskbar::Taskbar, window::DesktopWindow};
use crate::{
    geometry::TASKBAR_HEIGHT,
    gesture::{GestureGuard, GestureSlot},
    model::{PointerPosition, WindowId},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureEnd {
    Released,
    Cancelled,
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Captures the pointer and follows it at window level until release or cancel.
///
/// Everything acquired here lives in `slot`; ending the gesture, starting another one in the
/// same slot, or disposing the owning component releases it.
fn begin_pointer_gesture(
    slot: StoredValue<GestureSlot>,
    event: &web_sys::PointerEvent,
    on_move: impl Fn(PointerPosition) + 'static,
    on_end: impl Fn(GestureEnd) + Copy + 'static,
) {
    let finish = move |end: GestureEnd| {
        slot.try_update_value(|active| {
            active.end();
        });
        on_end(end);
    };
    let guard = GestureGuard::begin(event)
        .listen(window_event_listener(ev::pointermove, move |ev| {
            on_move(pointer_from_pointer_event(&ev));
        }))
        .listen(window_event_listener(ev::pointerup, move |_| {
            finish(GestureEnd::Released);
        }))
        .listen(window_event_listener(ev::pointercancel, move |_| {
            finish(GestureEnd::Cancelled);
        }));
    slot.update_value(|active| active.replace(guard));
}

/// Gesture slot for one component, ended when the component is disposed.
fn component_gesture_slot() -> StoredValue<GestureSlot> {
    let slot = store_value(GestureSlot::default());
    on_cleanup(move || {
        slot.try_update_value(|active| {
            active.end();
        });
    });
    slot
}

#[component]
/// Full desktop: icon grid, managed windows, sticky notes, taskbar and the cursor follower.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let window_ids = create_memo(move |_| {
        state.with(|desktop| desktop.windows.iter().map(|w| w.id).collect::<Vec<WindowId>>())
    });

    view! {
        <div id="desktop-shell-root" class="desktop">
            <DesktopIconLayer />
            <div
                class="desktop-windows-layer"
                style=format!("top:0;left:0;right:0;bottom:{TASKBAR_HEIGHT}px;")
            >
                <For
                    each=move || window_ids.get()
                    key=|window_id| *window_id
                    children=move |window_id| view! { <DesktopWindow window_id=window_id /> }
                />
            </div>
            <StickyNotesLayer />
            <Taskbar />
            <DuckFollower />
        </div>
    }
}
