//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer state, the runtime effect queue, the lifecycle
//! bus and the sticky-notes context. UI composition stays in [`crate::components`].

use std::rc::Rc;

use desktop_app_sticky_notes::{provide_sticky_notes, StickyNotesContext};
use leptos::*;
use platform_host::PrefsStore;

use crate::{
    apps, effect_executor,
    events::LifecycleBus,
    geometry::LayerSize,
    host,
    model::{DesktopState, InteractionState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Window lifecycle publish/subscribe bus.
    pub lifecycle: StoredValue<LifecycleBus>,
    /// Sticky notes and their list window.
    pub notes: StickyNotesContext,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

fn install_viewport_tracking(runtime: DesktopRuntimeContext) {
    let resize_listener = window_event_listener(ev::resize, move |_| {
        let (width, height) = host::viewport_size();
        runtime.dispatch_action(DesktopAction::SetViewport { width, height });
    });
    on_cleanup(move || resize_listener.remove());
}

fn open_deep_links(runtime: DesktopRuntimeContext) {
    for app_id in host::current_deep_link_apps() {
        runtime.dispatch_action(DesktopAction::ActivateApp { app_id });
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Preference storage assembled by the entry layer.
    prefs_store: Rc<dyn PrefsStore>,
    children: Children,
) -> impl IntoView {
    let notes = provide_sticky_notes(prefs_store);
    let (width, height) = host::viewport_size();
    let state = create_rw_signal(DesktopState::with_icons(
        apps::desktop_icons(),
        LayerSize::desktop_area(width, height),
    ));
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let lifecycle = store_value(LifecycleBus::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if state.with_untracked(|current| current != &desktop) {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        state,
        interaction,
        effects,
        lifecycle,
        notes,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    install_viewport_tracking(runtime);
    open_deep_links(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
