use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate},
};
use wasm_bindgen::JsValue;

use super::{NavigationError, NavigationProvider};

/// Router push plus the window's `history` and `location` objects.
///
/// Must be built inside a `<Router/>`. Construction touches no browser API, so
/// it is safe during server rendering; the calls themselves only make sense
/// in the browser.
#[derive(Clone)]
pub struct BrowserNavigation {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
    pathname: Memo<String>,
}

impl BrowserNavigation {
    #[must_use]
    pub fn from_router() -> Self {
        Self {
            navigate: Rc::new(use_navigate()),
            pathname: use_location().pathname,
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl NavigationProvider for BrowserNavigation {
    fn current_path(&self) -> String {
        self.pathname.get_untracked()
    }

    fn push(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }

    fn redirect(&self, path: &str) {
        (self.navigate)(
            path,
            NavigateOptions {
                replace: true,
                ..NavigateOptions::default()
            },
        );
    }

    // Bypasses the router on purpose; its location only catches up on the next push.
    fn replace_entry(&self, path: &str) -> Result<(), NavigationError> {
        window()
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(path)))
            .map_err(|err| NavigationError::History(describe(&err)))
    }

    fn assign_location(&self, target: &str) -> Result<(), NavigationError> {
        window()
            .location()
            .set_href(target)
            .map_err(|err| NavigationError::Location(describe(&err)))
    }
}
