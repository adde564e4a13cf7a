mod web_app;

pub use web_app::SiteApp;

/// Id of the element the desktop mounts into.
pub const MOUNT_ELEMENT_ID: &str = "desktop-root";

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();

    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ELEMENT_ID))
    else {
        leptos::logging::error!("mount element #{MOUNT_ELEMENT_ID} not found; nothing mounted");
        return;
    };

    leptos::mount_to(root.unchecked_into::<web_sys::HtmlElement>(), || {
        leptos::view! { <SiteApp /> }
    })
}
