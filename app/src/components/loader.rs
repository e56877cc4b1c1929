//! This module defines the `loader` component, which displays a spinning glyph
//! with an accompanying "Loading..." caption.
//!
//! The container and the caption each run their own entrance transition, the
//! caption trailing the container slightly, while the glyph rotates for as long
//! as it is mounted. [`presence`] additionally plays the exit transition before
//! the tree is removed.

use icondata::FiLoader;
use leptos::{
    html::{div, p},
    prelude::*,
    svg::svg,
};

use crate::transition::{Spin, Transition, TransitionState, use_transition};

/// Renders the loading indicator. It never leaves on its own; unmount it or use
/// [`presence`] for an animated exit.
pub fn component() -> impl IntoView {
    presence(Signal::derive(|| true))
}

/// Renders the loading indicator while `when` is true, fading it out before
/// removal once `when` turns false.
pub fn presence(when: Signal<bool>) -> impl IntoView {
    let container = use_transition(Transition::container(), when);
    let caption = use_transition(Transition::caption(), when);
    let spin = Spin::default();

    move || {
        container.with(TransitionState::is_mounted).then(|| {
            div()
                .class("flex absolute inset-0 flex-col gap-1 justify-center items-center m-auto")
                .attr("role", "status")
                .style(move || container.with(TransitionState::style))
                .child((
                    svg()
                        .attr("viewBox", FiLoader.view_box)
                        .inner_html(FiLoader.data)
                        .attr("fill", "none")
                        .attr("stroke", "currentColor")
                        .attr("stroke-width", "2")
                        .attr("aria-hidden", "true")
                        .attr("style", spin.style())
                        .class("animate-spin size-8 text-[#ffef5c]"),
                    p().class("text-sm italic text-muted-foreground")
                        .style(move || caption.with(TransitionState::style))
                        .child("Loading..."),
                ))
        })
    }
}
