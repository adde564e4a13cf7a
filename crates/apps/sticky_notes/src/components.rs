//! Leptos views for note windows and the notes list window.

use std::rc::Rc;

use leptos::*;
use platform_host::PrefsStore;
use platform_host_web::PointerCaptureGuard;

use crate::{
    book::NoteBook,
    model::{palette_color, StickyNote, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH, NOTE_COLORS},
    stack::NoteStack,
};

const LIST_LEFT: f64 = 40.0;
const LIST_TOP: f64 = 40.0;
const LIST_WIDTH: f64 = 320.0;
const LIST_HEIGHT: f64 = 420.0;

#[derive(Clone, Copy)]
/// Leptos context shared by the notes layer and whoever opens the notes list.
pub struct StickyNotesContext {
    /// Persisted notes.
    pub book: RwSignal<NoteBook>,
    /// Z-order of note windows and the list window.
    pub stack: RwSignal<NoteStack>,
    /// Whether the notes list window is showing.
    pub list_open: RwSignal<bool>,
    list_position: RwSignal<(f64, f64)>,
}

impl StickyNotesContext {
    fn new(store: Rc<dyn PrefsStore>) -> Self {
        Self {
            book: create_rw_signal(NoteBook::load(store)),
            stack: create_rw_signal(NoteStack::default()),
            list_open: create_rw_signal(false),
            list_position: create_rw_signal((LIST_LEFT, LIST_TOP)),
        }
    }

    /// Shows the list window, or raises it when it is already showing.
    pub fn open_list(&self) {
        self.list_open.set(true);
        self.raise_list();
    }

    pub fn close_list(&self) {
        self.list_open.set(false);
    }

    fn raise_list(&self) {
        self.stack.update(|stack| {
            stack.bring_list_to_front();
        });
    }

    /// Adds a blank note, opens its window on top and returns its id.
    pub fn create_note(&self) -> Option<String> {
        let id = self.book.try_update(NoteBook::create)?;
        self.focus_note(&id);
        Some(id)
    }

    /// Opens a hidden note or hides an open one.
    pub fn toggle_note(&self, id: &str) {
        let opened = self.book.try_update(|book| book.toggle_open(id)).flatten();
        if opened == Some(true) {
            self.focus_note(id);
        }
    }

    /// Hides a note window without deleting the note.
    pub fn close_note(&self, id: &str) {
        self.book.update(|book| book.set_open(id, false));
    }

    /// Stores the editor HTML of a note.
    pub fn save_content(&self, id: &str, html: String) {
        self.book.update(|book| book.set_content(id, html));
    }

    pub fn delete_note(&self, id: &str) {
        self.book.update(|book| {
            book.delete(id);
        });
        self.stack.update(|stack| stack.forget(id));
    }

    pub fn focus_note(&self, id: &str) {
        self.stack.update(|stack| {
            stack.bring_to_front(id);
        });
    }
}

/// Loads the notebook from `store` and provides [`StickyNotesContext`] to descendants.
pub fn provide_sticky_notes(store: Rc<dyn PrefsStore>) -> StickyNotesContext {
    let context = StickyNotesContext::new(store);
    provide_context(context);
    context
}

/// Returns the current [`StickyNotesContext`].
///
/// # Panics
///
/// Panics if called outside a tree where [`provide_sticky_notes`] ran.
pub fn use_sticky_notes() -> StickyNotesContext {
    use_context::<StickyNotesContext>().expect("StickyNotesContext not provided")
}

struct PointerDrag {
    origin: (f64, f64),
    _capture: Option<PointerCaptureGuard>,
}

impl PointerDrag {
    fn begin(ev: &web_sys::PointerEvent) -> Self {
        Self {
            origin: client_point(ev),
            _capture: PointerCaptureGuard::acquire(ev),
        }
    }

    fn delta(&self, ev: &web_sys::PointerEvent) -> (f64, f64) {
        let (x, y) = client_point(ev);
        (x - self.origin.0, y - self.origin.1)
    }
}

fn client_point(ev: &web_sys::PointerEvent) -> (f64, f64) {
    (f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    ev.button() == 0 && ev.is_primary()
}

fn stop_pointer(ev: web_sys::PointerEvent) {
    ev.stop_propagation();
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NoteRect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl NoteRect {
    fn of(note: &StickyNote) -> Self {
        Self {
            left: note.left,
            top: note.top,
            width: note.width,
            height: note.height,
        }
    }

    fn moved(self, (dx, dy): (f64, f64)) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..self
        }
    }

    fn resized(self, (dx, dy): (f64, f64)) -> Self {
        Self {
            width: (self.width + dx).max(MIN_NOTE_WIDTH),
            height: (self.height + dy).max(MIN_NOTE_HEIGHT),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteGestureKind {
    Move,
    Resize,
}

struct NoteGesture {
    kind: NoteGestureKind,
    start: NoteRect,
    drag: PointerDrag,
}

impl NoteGesture {
    fn rect_at(&self, ev: &web_sys::PointerEvent) -> NoteRect {
        let delta = self.drag.delta(ev);
        match self.kind {
            NoteGestureKind::Move => self.start.moved(delta),
            NoteGestureKind::Resize => self.start.resized(delta),
        }
    }
}

#[component]
/// Renders every open note window plus the notes list window when it is showing.
pub fn StickyNotesLayer() -> impl IntoView {
    let notes = use_sticky_notes();

    view! {
        <For
            each=move || notes.book.with(NoteBook::open_note_ids)
            key=|id: &String| id.clone()
            children=|id: String| view! { <StickyNoteWindow id=id /> }
        />
        <Show when=move || notes.list_open.get() fallback=|| ()>
            <StickyNotesList />
        </Show>
    }
}

#[component]
fn StickyNoteWindow(id: String) -> impl IntoView {
    let notes = use_sticky_notes();
    let note_id = store_value(id);
    let note = create_memo(move |_| {
        note_id.with_value(|id| notes.book.with(|book| book.get(id).cloned()))
    });
    // Geometry while a gesture is in flight; committed to the notebook on release.
    let draft = create_rw_signal(None::<NoteRect>);
    let gesture = store_value(None::<NoteGesture>);
    let editor = create_node_ref::<html::Div>();

    let begin = move |kind: NoteGestureKind, ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        let Some(start) = note.get_untracked().as_ref().map(NoteRect::of) else {
            return;
        };
        ev.prevent_default();
        ev.stop_propagation();
        notes.focus_note(&note_id.get_value());
        gesture.set_value(Some(NoteGesture {
            kind,
            start,
            drag: PointerDrag::begin(&ev),
        }));
        draft.set(Some(start));
    };
    let track = move |ev: web_sys::PointerEvent| {
        if let Some(rect) = gesture.with_value(|g| g.as_ref().map(|g| g.rect_at(&ev))) {
            draft.set(Some(rect));
        }
    };
    let finish = move |_: web_sys::PointerEvent| {
        let Some(kind) = gesture.with_value(|g| g.as_ref().map(|g| g.kind)) else {
            return;
        };
        gesture.set_value(None);
        if let Some(rect) = draft.get_untracked() {
            let id = note_id.get_value();
            notes.book.update(|book| match kind {
                NoteGestureKind::Move => book.move_to(&id, rect.left, rect.top),
                NoteGestureKind::Resize => book.resize(&id, rect.width, rect.height),
            });
        }
        draft.set(None);
    };

    let save_content = move |_| {
        if let Some(surface) = editor.get_untracked() {
            let html = web_sys::Element::inner_html(&surface);
            notes.save_content(&note_id.get_value(), html);
        }
    };
    let initial_html = note
        .get_untracked()
        .map(|note| note.content)
        .unwrap_or_default();

    let style = move || {
        let Some(current) = note.get() else {
            return String::new();
        };
        let rect = draft.get().unwrap_or_else(|| NoteRect::of(&current));
        let z = note_id.with_value(|id| notes.stack.with(|stack| stack.note_z(id)));
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{z};background:{};",
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            palette_color(&current.color)
        )
    };
    let color = move || {
        note.with(|note| note.as_ref().map(|note| palette_color(&note.color)))
            .unwrap_or_default()
    };

    view! {
        <div
            class="desktop-window desktop-window--note"
            style=style
            on:pointerdown=move |_| notes.focus_note(&note_id.get_value())
        >
            <div
                class="desktop-window__titlebar desktop-window__titlebar--note"
                style=move || format!("background:{};", color())
                on:pointerdown=move |ev| begin(NoteGestureKind::Move, ev)
                on:pointermove=track
                on:pointerup=finish
                on:pointercancel=finish
            >
                <div class="desktop-window__title">"Note"</div>
                <div class="desktop-window__controls">
                    <button
                        class="desktop-window__button desktop-window__button--close"
                        aria-label="Close note"
                        on:pointerdown=stop_pointer
                        on:click=move |_| notes.close_note(&note_id.get_value())
                    >
                        <i class="fa-solid fa-xmark"></i>
                    </button>
                </div>
            </div>
            <div class="desktop-window__content desktop-window__content--note">
                <div
                    class="sticky-note__editor"
                    contenteditable="true"
                    node_ref=editor
                    inner_html=initial_html
                    on:input=save_content
                ></div>
                <div class="sticky-note__toolbar">
                    {NOTE_COLORS
                        .iter()
                        .map(move |swatch| {
                            let swatch = *swatch;
                            view! {
                                <button
                                    class="sticky-note__swatch"
                                    class:is-active=move || color() == swatch
                                    style=format!("background:{swatch};")
                                    aria-label=format!("Note color {swatch}")
                                    on:click=move |_| {
                                        let id = note_id.get_value();
                                        notes.book.update(|book| book.set_color(&id, swatch));
                                    }
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div
                class="sticky-note__resize"
                aria-hidden="true"
                on:pointerdown=move |ev| begin(NoteGestureKind::Resize, ev)
                on:pointermove=track
                on:pointerup=finish
                on:pointercancel=finish
            ></div>
        </div>
    }
}

struct ListDrag {
    start: (f64, f64),
    drag: PointerDrag,
}

#[component]
fn StickyNotesList() -> impl IntoView {
    let notes = use_sticky_notes();
    let drag = store_value(None::<ListDrag>);

    let begin = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        notes.raise_list();
        drag.set_value(Some(ListDrag {
            start: notes.list_position.get_untracked(),
            drag: PointerDrag::begin(&ev),
        }));
    };
    let track = move |ev: web_sys::PointerEvent| {
        let next = drag.with_value(|d| {
            d.as_ref().map(|d| {
                let (dx, dy) = d.drag.delta(&ev);
                (d.start.0 + dx, d.start.1 + dy)
            })
        });
        if let Some(position) = next {
            notes.list_position.set(position);
        }
    };
    let finish = move |_: web_sys::PointerEvent| drag.set_value(None);

    let style = move || {
        let (left, top) = notes.list_position.get();
        format!(
            "left:{left}px;top:{top}px;width:{LIST_WIDTH}px;height:{LIST_HEIGHT}px;z-index:{};",
            notes.stack.with(NoteStack::list_z)
        )
    };

    view! {
        <div
            class="desktop-window desktop-window--note-list"
            style=style
            on:pointerdown=move |_| notes.raise_list()
        >
            <div
                class="desktop-window__titlebar desktop-window__titlebar--note-list"
                on:pointerdown=begin
                on:pointermove=track
                on:pointerup=finish
                on:pointercancel=finish
            >
                <div class="desktop-window__title">"Sticky Notes"</div>
                <div class="desktop-window__controls">
                    <button
                        class="desktop-window__button"
                        aria-label="New note"
                        on:pointerdown=stop_pointer
                        on:click=move |_| {
                            notes.create_note();
                        }
                    >
                        <i class="fa-solid fa-plus"></i>
                    </button>
                    <button
                        class="desktop-window__button desktop-window__button--close"
                        aria-label="Close notes list"
                        on:pointerdown=stop_pointer
                        on:click=move |_| notes.close_list()
                    >
                        <i class="fa-solid fa-xmark"></i>
                    </button>
                </div>
            </div>
            <div class="desktop-window__content desktop-window__content--note-list">
                <div class="sticky-notes-list">
                    {move || {
                        notes
                            .book
                            .with(|book| book.notes().to_vec())
                            .into_iter()
                            .map(|note| view! { <NoteListRow note=note /> })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn NoteListRow(note: StickyNote) -> impl IntoView {
    let notes = use_sticky_notes();
    let toggle_id = note.id.clone();
    let delete_id = note.id.clone();
    let class = if note.is_open {
        "sticky-notes-list__row"
    } else {
        "sticky-notes-list__row is-closed"
    };

    view! {
        <div
            class=class
            style=format!("border-left-color:{};", palette_color(&note.color))
            on:click=move |_| notes.toggle_note(&toggle_id)
        >
            <div class="sticky-notes-list__preview">{note.preview()}</div>
            <button
                class="sticky-notes-list__delete"
                aria-label="Delete note"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    notes.delete_note(&delete_id);
                }
            >
                <i class="fa-solid fa-trash"></i>
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{parse_notes, NOTES_STORAGE_KEY},
        stack::NOTES_BASE_Z,
    };

    fn context_with(store: &MemoryPrefsStore) -> StickyNotesContext {
        let _ = leptos::create_runtime();
        StickyNotesContext::new(Rc::new(store.clone()))
    }

    #[test]
    fn editor_input_is_persisted_immediately() {
        let store = MemoryPrefsStore::default();
        let notes = context_with(&store);
        let id = notes.create_note().expect("note created");

        notes.save_content(&id, "<b>draft</b><br>two".to_string());

        let raw = store.raw(NOTES_STORAGE_KEY).expect("notes persisted");
        let saved = parse_notes(&raw).into_iter().find(|note| note.id == id);
        assert_eq!(saved.map(|note| note.content), Some("<b>draft</b><br>two".to_string()));
    }

    #[test]
    fn deleting_a_note_drops_its_window_and_stacking() {
        let store = MemoryPrefsStore::default();
        let notes = context_with(&store);
        let id = notes.create_note().expect("note created");
        assert!(notes.stack.with_untracked(|stack| stack.note_z(&id)) > NOTES_BASE_Z);

        notes.delete_note(&id);

        assert!(!notes.book.with_untracked(NoteBook::open_note_ids).contains(&id));
        assert_eq!(notes.stack.with_untracked(|stack| stack.note_z(&id)), NOTES_BASE_Z);
        let raw = store.raw(NOTES_STORAGE_KEY).expect("notes persisted");
        assert!(parse_notes(&raw).iter().all(|note| note.id != id));
    }

    #[test]
    fn toggling_reopens_and_raises_a_closed_note() {
        let store = MemoryPrefsStore::default();
        let notes = context_with(&store);
        let id = notes.create_note().expect("note created");
        notes.close_note(&id);
        assert!(!notes.book.with_untracked(NoteBook::open_note_ids).contains(&id));

        let before = notes.stack.with_untracked(|stack| stack.note_z(&id));
        notes.toggle_note(&id);
        assert!(notes.book.with_untracked(NoteBook::open_note_ids).contains(&id));
        assert!(notes.stack.with_untracked(|stack| stack.note_z(&id)) > before);
    }

    fn rect() -> NoteRect {
        NoteRect {
            left: 100.0,
            top: 50.0,
            width: 260.0,
            height: 220.0,
        }
    }

    #[test]
    fn move_offsets_origin_only() {
        assert_eq!(
            rect().moved((15.0, -10.0)),
            NoteRect {
                left: 115.0,
                top: 40.0,
                ..rect()
            }
        );
    }

    #[test]
    fn resize_stops_at_minimum_size() {
        assert_eq!(
            rect().resized((-500.0, 30.0)),
            NoteRect {
                width: MIN_NOTE_WIDTH,
                height: 250.0,
                ..rect()
            }
        );
    }
}
