use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Inner Portfolio" />
        <Meta name="description" content="A desktop-style portfolio: open windows, drag icons, leave a sticky note." />

        <main class="site-root">
            <DesktopProvider prefs_store=platform_host_web::prefs_store()>
                <DesktopShell />
            </DesktopProvider>
        </main>
    }
}
