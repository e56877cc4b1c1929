//! This module defines the `error_template` component, which renders routing
//! errors such as an unknown path.
//!
//! On the server it sets the HTTP status of the response. In the browser it
//! schedules a soft redirect to the home page that replaces the broken history
//! entry through the router, and cancels that redirect if the page is left
//! first.

use http::status::StatusCode;
use leptos::{
    html::{a, div, h1, p},
    prelude::*,
};
use thiserror::Error;

use crate::navigation::{NavigationProvider, Navigator, Timer, use_navigation};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Collects the [`AppError`]s held in `errors`, ignoring anything else.
pub fn app_errors(errors: Errors) -> Vec<AppError> {
    errors
        .into_iter()
        .filter_map(|(_key, err)| err.downcast_ref::<AppError>().cloned())
        .collect()
}

/// Sends the visitor home in place of the broken entry, unless the current
/// owner is cleaned up first.
fn redirect_home<P, T>(navigator: &Navigator<P, T>)
where
    P: NavigationProvider + 'static,
    T: Timer,
{
    if let Ok(pending) = navigator.soft_redirect("/") {
        pending.cancel_on_cleanup();
    }
}

/// Renders an error page for the errors gathered by the router fallback.
pub fn component(outside_errors: Errors) -> impl IntoView {
    let errors = app_errors(outside_errors);

    // On the server, set the HTTP response status code based on the first error.
    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    // Effects never run on the server, so the redirect is browser-only.
    Effect::new(move |_| redirect_home(&use_navigation()));

    let heading = if errors.len() > 1 { "Errors" } else { "Error" };
    div().class("grid place-content-center px-4 h-full antialiased").child((
        h1().class("mb-6 text-center").child(heading),
        errors
            .into_iter()
            .map(|error| {
                h1().class("text-xl tracking-widest text-gray-400 uppercase")
                    .child(format!("{}| {error}", error.status_code()))
            })
            .collect_view(),
        p().class("mt-6 text-center text-gray-400").child((
            "Taking you ",
            a().href("/").class("duration-200 hover:text-[#68b5fc]").child("back home"),
            "...",
        )),
    ))
}
