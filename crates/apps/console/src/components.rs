use desktop_app_contract::ApplicationId;
use leptos::ev::KeyboardEvent;
use leptos::*;

use crate::session::{ConsoleRequest, ConsoleSession, PROMPT};

#[component]
/// Console window contents. `open` requests are handed to `on_open` after the session updates.
pub fn ConsoleApp(
    /// Ids listed by `apps`.
    app_ids: Vec<ApplicationId>,
    /// Opens an app on behalf of `open`.
    on_open: Callback<ApplicationId>,
) -> impl IntoView {
    let session = create_rw_signal(ConsoleSession::new(app_ids));
    let input = create_rw_signal(String::new());
    let screen_ref = create_node_ref::<html::Div>();
    let input_ref = create_node_ref::<html::Input>();

    let focus_input = move || {
        if let Some(field) = input_ref.get_untracked() {
            let _ = field.focus();
        }
    };

    create_effect(move |_| {
        session.with(|_| ());
        if let Some(screen) = screen_ref.get() {
            screen.set_scroll_top(screen.scroll_height());
        }
    });
    input_ref.on_load(move |_| focus_input());

    let submit = move || {
        let line = input.get_untracked();
        input.set(String::new());
        let request = session.try_update(|session| session.run(&line)).flatten();
        if let Some(ConsoleRequest::OpenApp(app_id)) = request {
            on_open.call(app_id);
        }
    };
    let recall = move |older: bool| {
        let entry = session.try_update(|session| {
            if older {
                session.history_older()
            } else {
                session.history_newer()
            }
        });
        if let Some(text) = entry.flatten() {
            input.set(text);
        }
    };

    view! {
        <div class="window-app window-app--console" on:click=move |_| focus_input()>
            <div class="cmd" node_ref=screen_ref role="log" aria-live="polite">
                <div class="cmd__buffer" aria-label="Command Prompt output">
                    <For
                        each=move || session.with(|session| session.lines().to_vec())
                        key=|line| line.id
                        let:line
                    >
                        <div class="cmd__line">
                            {if line.text.is_empty() { "\u{a0}".to_string() } else { line.text }}
                        </div>
                    </For>
                </div>
                <div class="cmd__entry">
                    <span class="cmd__prompt">{PROMPT}</span>
                    <input
                        node_ref=input_ref
                        class="cmd__input"
                        type="text"
                        aria-label="Command input"
                        autocomplete="off"
                        autocapitalize="off"
                        spellcheck="false"
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=move |ev: KeyboardEvent| match ev.key().as_str() {
                            "Enter" => {
                                ev.prevent_default();
                                submit();
                            }
                            "ArrowUp" => {
                                ev.prevent_default();
                                recall(true);
                            }
                            "ArrowDown" => {
                                ev.prevent_default();
                                recall(false);
                            }
                            _ => {}
                        }
                    />
                </div>
            </div>
        </div>
    }
}
