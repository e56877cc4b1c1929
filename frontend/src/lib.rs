//! WASM entry point for the waypoint app.
//!
//! Hydrates the server-rendered HTML so soft navigation and the loader's
//! transitions become live, and routes `leptos::logging` output to the browser
//! console.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the app on the client.
///
/// Installs `console_log` at debug level and the panic hook before mounting
/// `app::component` over the existing DOM.
pub fn hydrate() {
    use app::component;
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::hydrate_body(component);
}
