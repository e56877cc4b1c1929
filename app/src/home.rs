//! This module defines the `home` component, the landing page of the app.
//!
//! It toggles the loading indicator so its exit transition can be watched, and
//! offers each navigation primitive: a soft push, a soft replace and a hard
//! reload.

use leptos::{
    ev,
    html::{button, div, h1, p},
    prelude::*,
};
use leptos_meta::{Title, TitleProps};

use crate::{
    components::loader,
    navigation::{SoftNavigateOptions, use_navigation},
};

const BUTTON: &str =
    "py-1 px-3 rounded-lg transition-all duration-500 cursor-pointer bg-primary hover:text-black hover:bg-white";

/// Renders the home page.
///
/// `loading` drives [`loader::presence`], so hiding the indicator plays its
/// exit transition instead of cutting it away.
pub fn component() -> impl IntoView {
    let loading = RwSignal::new(true);
    let navigation = use_navigation();

    let push = {
        let navigation = navigation.clone();
        move |_: ev::MouseEvent| {
            // The loader starts fading now; the route changes once the delay elapses.
            loading.set(false);
            if let Ok(pending) = navigation.soft_navigate("/dashboard", SoftNavigateOptions::default()) {
                pending.detach();
            }
        }
    };
    let replace = {
        let navigation = navigation.clone();
        move |_: ev::MouseEvent| {
            loading.set(false);
            if let Ok(pending) = navigation.soft_navigate("/dashboard", SoftNavigateOptions::replace()) {
                pending.detach();
            }
        }
    };
    let reload = move |_: ev::MouseEvent| {
        let _ = navigation.hard_navigate(&navigation.current_path());
    };

    div().class("flex flex-col gap-6").child((
        Title(TitleProps::builder().text("waypoint").build()),
        h1().class("text-3xl font-bold text-[#ffef5c]").child("waypoint"),
        p().class("text-gray-300")
            .child("Soft navigation waits briefly so exit animations can start; hard navigation reloads the page."),
        div().class("relative h-32 rounded-lg bg-card").child(loader::presence(loading.into())),
        div().class("flex flex-row flex-wrap gap-2 text-sm").child((
            button()
                .class(BUTTON)
                .on(ev::click, move |_| loading.update(|shown| *shown = !*shown))
                .child(move || if loading.get() { "Hide loader" } else { "Show loader" }),
            button().class(BUTTON).on(ev::click, push).child("Open dashboard"),
            button().class(BUTTON).on(ev::click, replace).child("Replace with dashboard"),
            button().class(BUTTON).on(ev::click, reload).child("Reload"),
        )),
    ))
}
