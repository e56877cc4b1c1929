//! This module defines the `dashboard` component, the usual target of a soft
//! navigation from the home page.

use leptos::{
    ev,
    html::{button, div, h1},
    prelude::*,
};
use leptos_meta::{Title, TitleProps};

use crate::{
    components::loader,
    navigation::{SoftNavigateOptions, use_navigation},
};

pub fn component() -> impl IntoView {
    let navigation = use_navigation();

    div().class("flex flex-col gap-6").child((
        Title(TitleProps::builder().text("dashboard \u{2013} waypoint").build()),
        h1().class("text-3xl font-bold text-[#ffef5c]").child("dashboard"),
        div().class("relative h-32 rounded-lg bg-card").child(loader::component()),
        button()
            .class("self-start py-1 px-3 text-sm rounded-lg transition-all duration-500 cursor-pointer bg-primary hover:text-black hover:bg-white")
            .on(ev::click, move |_| {
                if let Ok(pending) = navigation.soft_navigate("/", SoftNavigateOptions::default()) {
                    pending.detach();
                }
            })
            .child("Back home"),
    ))
}
