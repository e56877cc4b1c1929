//! Leptos application hosting the loading indicator and the navigation helpers.
//!
//! [`components::loader`] renders the animated indicator, [`transition`] holds
//! the state machine behind its animations and [`navigation`] exposes delayed
//! soft navigation and immediate hard navigation over injectable browser
//! capabilities.

// Core application modules and components
use crate::components::{error_template, header};
use chrono::{Datelike as _, Utc};
use leptos::{
    html::{a, body, div, footer, head, html, main, meta, p},
    prelude::*,
};
use leptos_meta::{MetaTags, Stylesheet, StylesheetProps, Title, TitleProps, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{FlatRoutes, Route, Router},
};

pub mod components;
pub mod config;
mod dashboard;
mod home;
pub mod navigation;
pub mod transition;

use config::NavigationConfig;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let html_comp = html().lang("en").child((
        head().child((
            meta().charset("utf-8"),
            meta()
                .name("viewport")
                .content("width=device-width, initial-scale=1"),
            HydrationScripts(HydrationScriptsProps::builder().options(options).build()),
            MetaTags(),
            Stylesheet(
                StylesheetProps::builder()
                    .id("leptos")
                    .href("/pkg/waypoint.css")
                    .build(),
            ),
            Title(TitleProps::builder().text("waypoint").build()),
        )),
        body().class("bg-[#1e1e1e]").child(self::component),
    ));

    view! {
        <!DOCTYPE html>
        {html_comp}
    }
}

#[must_use]
pub fn component() -> impl IntoView {
    if use_context::<NavigationConfig>().is_none() {
        provide_context(NavigationConfig::default());
    }

    view! {
        <Router>
            <div class="overflow-auto text-white font-poppins">
                {header::component}
                <main class="container flex flex-col gap-8 px-4 pt-10 pb-14 mx-auto mt-16 max-w-4xl md:px-0">
                    <FlatRoutes fallback=|| {
                        let mut outside_errors = Errors::default();
                        outside_errors.insert_with_default_key(error_template::AppError::NotFound);
                        error_template::component(outside_errors)
                    }>
                        <Route path=StaticSegment("") view=home::component/>
                        <Route path=StaticSegment("dashboard") view=dashboard::component/>
                    </FlatRoutes>
                </main>
                {footer_component()}
            </div>
        </Router>
    }
}

fn footer_component() -> impl IntoView {
    footer()
        .class("fixed right-0 bottom-0 left-0 z-10 py-2 text-center md:py-4 bg-[#1e1e1e]/80 backdrop-blur-md")
        .child(
            div().class("flex flex-col gap-1 justify-center items-center").child(
                p().class("text-gray-400").child((
                    "Powered by",
                    a()
                        .href("https://leptos.dev")
                        .class("hover:underline text-[#ffef5c]")
                        .child(" leptos"),
                    format!(" \u{a9} {}", Utc::now().year()),
                )),
            ),
        )
}
