use std::rc::Rc;

use platform_host::PrefsStore;

use crate::storage::local_prefs::WebPrefsStore;

/// Returns the preference store used by the browser host.
pub fn prefs_store() -> Rc<dyn PrefsStore> {
    Rc::new(WebPrefsStore)
}
