use super::*;
use crate::{geometry::grid_to_pixel, reducer::DesktopAction};

#[component]
pub(super) fn DesktopIconLayer() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let icon_ids = create_memo(move |_| {
        runtime.state.with(|desktop| {
            desktop
                .icons
                .iter()
                .map(|icon| icon.id.clone())
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div
            class="desktop-icons-layer"
            style=format!("top:0;left:0;right:0;bottom:{TASKBAR_HEIGHT}px;")
            on:click=move |_| runtime.dispatch_action(DesktopAction::SelectIcon { icon_id: None })
        >
            <For
                each=move || icon_ids.get()
                key=|icon_id| icon_id.clone()
                children=move |icon_id| view! { <DesktopIconButton icon_id=icon_id /> }
            />
        </div>
    }
}

#[component]
fn DesktopIconButton(icon_id: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let gesture = component_gesture_slot();
    let id = store_value(icon_id);

    let Some(icon) = runtime
        .state
        .with_untracked(|desktop| id.with_value(|id| desktop.icon(id).cloned()))
    else {
        return ().into_view();
    };
    let app_id = icon.app_id.clone();

    let position = create_memo(move |_| {
        let dragged = runtime
            .interaction
            .with(|ui| id.with_value(|id| ui.dragged_icon_position(id)));
        dragged.or_else(|| {
            runtime
                .state
                .with(|desktop| id.with_value(|id| desktop.icon(id).map(|icon| grid_to_pixel(icon.cell))))
        })
    });
    let selected = create_memo(move |_| {
        runtime.state.with(|desktop| {
            id.with_value(|id| desktop.selected_icon.as_deref() == Some(id.as_str()))
        })
    });
    let dragging = move || {
        runtime
            .interaction
            .with(|ui| id.with_value(|id| ui.dragged_icon_position(id).is_some()))
    };
    let style = move || {
        position
            .get()
            .map(|point| format!("left:{}px;top:{}px;", point.x, point.y))
            .unwrap_or_default()
    };

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::PressIcon {
            icon_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
        begin_pointer_gesture(
            gesture,
            &ev,
            move |pointer| runtime.dispatch_action(DesktopAction::DragIcon { pointer }),
            move |end| {
                runtime.dispatch_action(match end {
                    GestureEnd::Released => DesktopAction::ReleaseIcon,
                    GestureEnd::Cancelled => DesktopAction::CancelIconDrag,
                })
            },
        );
    };
    let open = {
        let app_id = app_id.clone();
        move || {
            runtime.dispatch_action(DesktopAction::ActivateApp {
                app_id: app_id.clone(),
            })
        }
    };
    let open_on_key = open.clone();

    let glyph = icon
        .label
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    view! {
        <div
            class="desktop-icon"
            class=("desktop-icon--selected", move || selected.get())
            class=("desktop-icon--dragging", dragging)
            style=style
            role="button"
            tabindex="0"
            aria-label=icon.label.clone()
            data-app-id=app_id.to_string()
            on:pointerdown=on_pointerdown
            on:click=move |ev| ev.stop_propagation()
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                open();
            }
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Enter" {
                    ev.prevent_default();
                    open_on_key();
                }
            }
        >
            <div class="desktop-icon__image">
                {match icon.image.clone() {
                    Some(src) => view! { <img src=src alt="" draggable="false" /> }.into_view(),
                    None => view! { <span class="desktop-icon__glyph">{glyph}</span> }.into_view(),
                }}
            </div>
            <div class="desktop-icon__label">{icon.label.clone()}</div>
        </div>
    }
    .into_view()
}
