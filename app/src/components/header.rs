use leptos::{ev::MouseEvent, prelude::*};
use leptos_router::hooks::use_location;

use crate::navigation::{SoftNavigateOptions, use_navigation};

const LINKS: [(&str, &str); 2] = [("/", "home"), ("/dashboard", "dashboard")];

/// Modified or non-primary clicks keep their browser meaning (new tab, download).
const fn is_plain_primary_click(button: i16, modified: bool) -> bool {
    button == 0 && !modified
}

// Plain anchors keep working without WASM; with it, clicks are intercepted and
// routed through the delayed soft navigation instead.
pub fn component() -> impl IntoView {
    let navigation = use_navigation();
    let pathname = use_location().pathname;

    let links = LINKS
        .into_iter()
        .map(|(href, label)| {
            let navigation = navigation.clone();
            let on_click = move |ev: MouseEvent| {
                let modified = ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.alt_key();
                if !is_plain_primary_click(ev.button(), modified) {
                    return;
                }
                ev.prevent_default();
                if let Ok(pending) = navigation.soft_navigate(href, SoftNavigateOptions::default()) {
                    pending.detach();
                }
            };
            view! {
                <a
                    href=href
                    on:click=on_click
                    class="text-lg font-bold transition-all duration-500 sm:text-3xl hover:text-[#ffef5c]"
                    class:underline=move || pathname.get() == href
                >
                    {label}
                </a>
            }
        })
        .collect_view();

    view! {
        <header class="fixed top-0 right-0 left-0 z-10 py-6 px-4 md:px-6 bg-[#1e1e1e]/80 backdrop-blur-md">
            <div class="container mx-auto max-w-5xl">
                <nav class="flex flex-row gap-4 items-center text-white">{links}</nav>
            </div>
        </header>
    }
}
