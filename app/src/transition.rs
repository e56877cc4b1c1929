//! This module describes enter and exit transitions as an explicit state machine.
//!
//! Every animated element walks through [`Phase::Initial`], [`Phase::Entering`],
//! [`Phase::Steady`], [`Phase::Exiting`] and finally [`Phase::Removed`]. The
//! pure [`TransitionState`] decides which keyframe applies and renders it as
//! inline CSS, leaving the interpolation itself to the browser. A
//! [`TransitionDriver`] advances that state over time through a [`Timer`], and
//! the [`use_transition`] hook feeds it a `present` signal on the client.

use core::{fmt::Write as _, time::Duration};

use leptos::{logging, prelude::*};

use crate::navigation::{BrowserTimer, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Initial,
    Entering,
    Steady,
    Exiting,
    Removed,
}

/// A visual snapshot of an animated element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub opacity: f32,
    pub scale: f32,
    /// Vertical offset in pixels; positive values push the element down.
    pub offset_y: f32,
}

impl Keyframe {
    /// Fully visible, untransformed.
    pub const REST: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        offset_y: 0.0,
    };

    fn write_css(&self, out: &mut String) {
        let _ = write!(
            out,
            "opacity: {}; transform: translateY({}px) scale({});",
            self.opacity, self.offset_y, self.scale
        );
    }
}

/// Timing and keyframes for one element's entrance and exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub initial: Keyframe,
    pub animate: Keyframe,
    pub exit: Keyframe,
    pub duration: Duration,
    /// Applied to the entrance only.
    pub delay: Duration,
    pub exit_duration: Duration,
}

impl Transition {
    /// Fade and scale in from 80%, then back out the same way.
    #[must_use]
    pub const fn container() -> Self {
        let hidden = Keyframe {
            opacity: 0.0,
            scale: 0.8,
            offset_y: 0.0,
        };
        Self {
            initial: hidden,
            animate: Keyframe::REST,
            exit: hidden,
            duration: Duration::from_millis(300),
            delay: Duration::ZERO,
            exit_duration: Duration::from_millis(300),
        }
    }

    /// Fade in while sliding up, starting shortly after the container.
    #[must_use]
    pub const fn caption() -> Self {
        Self {
            initial: Keyframe {
                opacity: 0.0,
                scale: 1.0,
                offset_y: 10.0,
            },
            animate: Keyframe::REST,
            exit: Keyframe {
                opacity: 0.0,
                scale: 1.0,
                offset_y: 0.0,
            },
            duration: Duration::from_millis(300),
            delay: Duration::from_millis(200),
            exit_duration: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    transition: Transition,
    phase: Phase,
}

impl TransitionState {
    #[must_use]
    pub const fn new(transition: Transition) -> Self {
        Self {
            transition,
            phase: Phase::Initial,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Starts the entrance. An interrupted exit reverses into an entrance.
    pub fn enter(&mut self) -> bool {
        self.advance(|phase| match phase {
            Phase::Initial | Phase::Exiting => Some(Phase::Entering),
            _ => None,
        })
    }

    pub fn settle(&mut self) -> bool {
        self.advance(|phase| (phase == Phase::Entering).then_some(Phase::Steady))
    }

    /// Starts the exit. An element that never began entering is removed at once.
    pub fn exit(&mut self) -> bool {
        self.advance(|phase| match phase {
            Phase::Initial => Some(Phase::Removed),
            Phase::Entering | Phase::Steady => Some(Phase::Exiting),
            _ => None,
        })
    }

    pub fn remove(&mut self) -> bool {
        self.advance(|phase| (phase == Phase::Exiting).then_some(Phase::Removed))
    }

    /// Brings a removed element back to its initial keyframe so it can enter again.
    pub fn restart(&mut self) -> bool {
        self.advance(|phase| (phase == Phase::Removed).then_some(Phase::Initial))
    }

    fn advance(&mut self, next: impl FnOnce(Phase) -> Option<Phase>) -> bool {
        match next(self.phase) {
            Some(phase) => {
                self.phase = phase;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        !matches!(self.phase, Phase::Removed)
    }

    #[must_use]
    pub const fn keyframe(&self) -> Keyframe {
        match self.phase {
            Phase::Initial => self.transition.initial,
            Phase::Entering | Phase::Steady => self.transition.animate,
            Phase::Exiting | Phase::Removed => self.transition.exit,
        }
    }

    /// Time from the start of the entrance until the element is at rest.
    #[must_use]
    pub fn settle_after(&self) -> Duration {
        self.transition.delay + self.transition.duration
    }

    #[must_use]
    pub const fn remove_after(&self) -> Duration {
        self.transition.exit_duration
    }

    /// Inline CSS for the current phase.
    #[must_use]
    pub fn style(&self) -> String {
        let (duration, delay) = match self.phase {
            Phase::Exiting | Phase::Removed => (self.transition.exit_duration, Duration::ZERO),
            _ => (self.transition.duration, self.transition.delay),
        };
        let (duration, delay) = (duration.as_millis(), delay.as_millis());

        let mut css = String::new();
        self.keyframe().write_css(&mut css);
        let _ = write!(
            css,
            " transition: opacity {duration}ms ease-out {delay}ms, transform {duration}ms ease-out {delay}ms;"
        );
        css
    }
}

/// Continuous linear rotation that only stops when the element unmounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spin {
    pub period: Duration,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl Spin {
    /// Rotation in degrees, in `[0, 360)`, after `elapsed` of spinning.
    #[must_use]
    pub fn rotation_at(&self, elapsed: Duration) -> f32 {
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        let turns = elapsed.as_secs_f64() / period;
        (turns.fract() * 360.0) as f32
    }

    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "animation-duration: {}ms; animation-timing-function: linear; animation-iteration-count: infinite;",
            self.period.as_millis()
        )
    }
}

/// Delay standing in for one animation frame.
pub const FRAME: Duration = Duration::from_millis(16);

/// Advances a [`TransitionState`] over time through a [`Timer`].
///
/// Only one step waits on the timer at any moment; scheduling another step
/// cancels it. Every handle lives in the reactive arena, so the driver is
/// `Copy` and steps that fire after the owner is gone do nothing.
pub struct TransitionDriver<T: Timer> {
    state: RwSignal<TransitionState>,
    timer: StoredValue<T, LocalStorage>,
    pending: StoredValue<Option<T::Handle>, LocalStorage>,
}

impl<T: Timer> Clone for TransitionDriver<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Timer> Copy for TransitionDriver<T> {}

impl<T: Timer> TransitionDriver<T> {
    pub fn new(transition: Transition, timer: T) -> Self {
        Self {
            state: RwSignal::new(TransitionState::new(transition)),
            timer: StoredValue::new_local(timer),
            pending: StoredValue::new_local(None),
        }
    }

    pub const fn state(&self) -> RwSignal<TransitionState> {
        self.state
    }

    /// Starts (or restarts) the entrance one frame from now, so the initial
    /// keyframe is painted first. An exit in progress is reversed.
    pub fn show(&self) {
        let phase = self.state.try_with_untracked(TransitionState::phase);
        if matches!(phase, None | Some(Phase::Entering | Phase::Steady)) {
            return;
        }
        _ = self.state.try_update(TransitionState::restart);
        self.after(FRAME, Self::begin_entrance);
    }

    /// Starts the exit and removes the element once it has played.
    pub fn hide(&self) {
        if !self.state.try_update(TransitionState::exit).unwrap_or(false) {
            return;
        }
        match self
            .state
            .try_with_untracked(|state| state.is_mounted().then(|| state.remove_after()))
            .flatten()
        {
            Some(after) => self.after(after, Self::finish_exit),
            None => self.cancel_pending(),
        }
    }

    /// Drops the step waiting on the timer, if any.
    pub fn cancel_pending(&self) {
        let handle = self.pending.try_update_value(Option::take).flatten();
        if let (Some(handle), Some(timer)) = (handle, self.timer.try_get_value()) {
            timer.cancel(handle);
        }
    }

    fn begin_entrance(self) {
        if !self.state.try_update(TransitionState::enter).unwrap_or(false) {
            return;
        }
        if let Some(after) = self.state.try_with_untracked(TransitionState::settle_after) {
            self.after(after, Self::settle);
        }
    }

    fn settle(self) {
        _ = self.state.try_update(TransitionState::settle);
    }

    fn finish_exit(self) {
        _ = self.state.try_update(TransitionState::remove);
    }

    fn after(self, delay: Duration, step: fn(Self)) {
        self.cancel_pending();
        let Some(timer) = self.timer.try_get_value() else {
            return;
        };
        match timer.schedule(delay, Box::new(move || step(self))) {
            Ok(handle) => self.pending.set_value(Some(handle)),
            Err(err) => {
                logging::warn!("transition timer unavailable, skipping to next phase: {err}");
                step(self);
            }
        }
    }
}

/// Drives a [`TransitionState`] from `present` with browser timeouts.
///
/// Effects only run in the browser, so server rendering always emits the
/// initial keyframe and hydration picks up from there.
pub fn use_transition(transition: Transition, present: Signal<bool>) -> RwSignal<TransitionState> {
    let driver = TransitionDriver::new(transition, BrowserTimer);

    Effect::new(move |_| {
        if present.get() {
            driver.show();
        } else {
            driver.hide();
        }
    });
    on_cleanup(move || driver.cancel_pending());

    driver.state()
}
