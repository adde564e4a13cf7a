use std::time::Duration;

use super::*;
use crate::{
    reducer::DesktopAction,
    taskbar::{format_clock, local_clock_now, taskbar_entries, TaskbarEntry},
};

fn clock_text() -> String {
    let (hours, minutes) = local_clock_now();
    format_clock(hours, minutes)
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    // Buttons are recomputed on lifecycle events only; focus changes don't affect them.
    let refresh = create_trigger();
    let bus = runtime.lifecycle.get_value();
    let subscription = bus.subscribe(move |_| refresh.notify());
    on_cleanup(move || {
        bus.unsubscribe(subscription);
    });
    let entries = create_memo(move |_| {
        refresh.track();
        state.with_untracked(|desktop| taskbar_entries(&desktop.icons, &desktop.windows))
    });

    let clock = create_rw_signal(clock_text());
    if let Ok(interval) =
        set_interval_with_handle(move || clock.set(clock_text()), Duration::from_secs(1))
    {
        on_cleanup(move || interval.clear());
    }

    view! {
        <footer class="taskbar" style=format!("height:{TASKBAR_HEIGHT}px;")>
            <div class="taskbar__section taskbar__section--left">
                <button class="taskbar__start" aria-label="Start">
                    <span class="taskbar__start-icon" aria-hidden="true">"❖"</span>
                </button>
            </div>
            <div class="taskbar__section taskbar__section--center">
                <For
                    each=move || entries.get()
                    key=|entry| (entry.app_id.clone(), entry.state)
                    children=move |entry| view! { <TaskbarButton entry=entry /> }
                />
            </div>
            <div class="taskbar__section taskbar__section--right">
                <div class="taskbar__clock">{move || clock.get()}</div>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarButton(entry: TaskbarEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let glyph = entry.glyph();
    let TaskbarEntry {
        app_id,
        label,
        image,
        state,
    } = entry;

    view! {
        <button
            class=state.css_class()
            title=label.clone()
            aria-label=label.clone()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::ActivateApp { app_id: app_id.clone() });
            }
        >
            {match image {
                Some(src) => view! { <img class="taskbar__app-icon-image" src=src alt="" /> }.into_view(),
                None => view! { <span class="taskbar__app-icon-glyph">{glyph}</span> }.into_view(),
            }}
        </button>
    }
}
