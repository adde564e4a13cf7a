use desktop_app_console::ConsoleApp;
use desktop_app_contract::AppContent;

use super::*;
use crate::{apps, model::ResizeEdge, reducer::DesktopAction};

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let gesture = component_gesture_slot();

    let window = create_memo(move |_| {
        runtime
            .state
            .with(|desktop| desktop.window(window_id).cloned())
    });
    let is_top = create_memo(move |_| {
        runtime
            .state
            .with(|desktop| desktop.top_window_id() == Some(window_id))
    });
    let minimized = move || window.with(|w| w.as_ref().is_some_and(|w| w.minimized));
    let maximized = move || window.with(|w| w.as_ref().is_some_and(|w| w.maximized));
    let style = move || {
        window.with(|w| {
            w.as_ref()
                .map(|w| {
                    format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                        w.rect.x, w.rect.y, w.rect.w, w.rect.h, w.z_index
                    )
                })
                .unwrap_or_default()
        })
    };

    // Title and content are fixed for the life of the window.
    let (title, content) = window
        .get_untracked()
        .map(|w| (w.title, w.content))
        .unwrap_or_else(|| (String::new(), AppContent::placeholder()));
    let class_name = format!("desktop-window desktop-window--{}", content.kind_name());

    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
    };
    let toggle_maximize =
        move || runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });

    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
        if runtime
            .interaction
            .with_untracked(|ui| ui.dragging.is_none())
        {
            return;
        }
        begin_pointer_gesture(
            gesture,
            &ev,
            move |pointer| runtime.dispatch_action(DesktopAction::UpdateMove { pointer }),
            move |_| runtime.dispatch_action(DesktopAction::EndMove),
        );
    };

    view! {
        <section
            class=class_name
            class=("desktop-window--focused", move || is_top.get())
            class=("desktop-window--minimized", minimized)
            class=("desktop-window--maximized", maximized)
            style=style
            on:pointerdown=focus
            role="dialog"
            aria-label=title.clone()
        >
            <header
                class="desktop-window__titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <span class="desktop-window__title">{title.clone()}</span>
                <div class="desktop-window__controls">
                    <WindowControl
                        label=Signal::derive(|| "Minimize window")
                        glyph=Signal::derive(|| "_")
                        on_click=Callback::new(move |_| {
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id })
                        })
                    />
                    <WindowControl
                        label=Signal::derive(move || {
                            if maximized() { "Restore window" } else { "Maximize window" }
                        })
                        glyph=Signal::derive(move || if maximized() { "❐" } else { "□" })
                        on_click=Callback::new(move |_| toggle_maximize())
                    />
                    <WindowControl
                        label=Signal::derive(|| "Close window")
                        glyph=Signal::derive(|| "×")
                        on_click=Callback::new(move |_| {
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id })
                        })
                    />
                </div>
            </header>
            <div class="desktop-window__content">{render_content(runtime, title, content)}</div>
            <Show when=move || !maximized() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| {
                        view! { <WindowResizeHandle window_id=window_id edge=edge gesture=gesture /> }
                    })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowControl(
    label: Signal<&'static str>,
    glyph: Signal<&'static str>,
    on_click: Callback<web_sys::MouseEvent>,
) -> impl IntoView {
    view! {
        <button
            class="desktop-window__button"
            aria-label=move || label.get()
            title=move || label.get()
            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
            on:dblclick=move |ev| stop_mouse_event(&ev)
            on:click=move |ev| {
                stop_mouse_event(&ev);
                on_click.call(ev);
            }
        >
            {move || glyph.get()}
        </button>
    }
}

#[component]
fn WindowResizeHandle(
    window_id: WindowId,
    edge: ResizeEdge,
    gesture: StoredValue<GestureSlot>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!(
        "desktop-window__resize-handle desktop-window__resize-handle--{}",
        edge.css_name()
    );

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
        if runtime
            .interaction
            .with_untracked(|ui| ui.resizing.is_none())
        {
            return;
        }
        begin_pointer_gesture(
            gesture,
            &ev,
            move |pointer| runtime.dispatch_action(DesktopAction::UpdateResize { pointer }),
            move |_| runtime.dispatch_action(DesktopAction::EndResize),
        );
    };

    view! { <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown /> }
}

fn render_content(runtime: DesktopRuntimeContext, title: String, content: AppContent) -> View {
    match content {
        AppContent::Text { html } => {
            view! { <div class="window-app window-app--text" inner_html=html></div> }.into_view()
        }
        AppContent::Website { url } => view! {
            <iframe
                class="window-app__frame"
                src=url
                title=title
                referrerpolicy="no-referrer"
                loading="lazy"
            ></iframe>
        }
        .into_view(),
        AppContent::Pdf { url } => view! {
            <object class="window-app__frame" data=url.clone() type="application/pdf">
                <p>
                    "This browser can't show the document inline. "
                    <a href=url target="_blank" rel="noreferrer">
                        "Open it in a new tab."
                    </a>
                </p>
            </object>
        }
        .into_view(),
        AppContent::StickyNotes => {
            view! { <p class="window-app">"Sticky notes open from the notes list."</p> }
                .into_view()
        }
        AppContent::Console => {
            let app_ids = apps::app_catalog()
                .entries()
                .iter()
                .map(|entry| entry.app_id.clone())
                .collect::<Vec<_>>();
            let on_open = Callback::new(move |app_id| {
                runtime.dispatch_action(DesktopAction::LaunchApp { app_id })
            });
            view! { <ConsoleApp app_ids=app_ids on_open=on_open /> }.into_view()
        }
    }
}
