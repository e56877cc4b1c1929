//! This module provides the two navigation primitives used across the app.
//!
//! - **Soft navigation** changes the route client-side after a short, fixed
//!   delay so an exit animation started by the caller gets a head start.
//!   [`Navigator::soft_redirect`] does the same through a router-driven
//!   replacement of the current entry.
//! - **Hard navigation** hands the target to the browser immediately and
//!   reloads the document.
//!
//! Browser globals are reached through the [`NavigationProvider`] and
//! [`Timer`] seams so tests can substitute fakes. A soft navigation returns a
//! [`PendingNavigation`] handle; dropping it leaves the navigation scheduled,
//! while [`PendingNavigation::cancel`] and
//! [`PendingNavigation::cancel_on_cleanup`] opt into cancellation.

use core::fmt;
use std::{
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
};

use leptos::{logging, prelude::*};
use thiserror::Error;

use crate::config::NavigationConfig;

mod browser;
mod timer;

pub use browser::BrowserNavigation;
pub use timer::{BrowserTimer, ManualHandle, ManualTimer, Timer};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("history update rejected: {0}")]
    History(String),
    #[error("location assignment rejected: {0}")]
    Location(String),
    #[error("could not schedule navigation: {0}")]
    Timer(String),
}

/// The capabilities a navigator needs from its host.
#[cfg_attr(test, mockall::automock)]
pub trait NavigationProvider {
    /// Path the router currently displays.
    fn current_path(&self) -> String;

    /// Pushes a new history entry through the client router.
    fn push(&self, path: &str);

    /// Replaces the current history entry through the client router, so the
    /// matched route follows the new path.
    fn redirect(&self, path: &str);

    /// Rewrites the current history entry in place, without the router.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::History`] when the browser rejects the path.
    fn replace_entry(&self, path: &str) -> Result<(), NavigationError>;

    /// Starts a full document navigation to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Location`] when the browser rejects the URL.
    fn assign_location(&self, target: &str) -> Result<(), NavigationError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftNavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl SoftNavigateOptions {
    #[must_use]
    pub const fn replace() -> Self {
        Self { replace: true }
    }
}

/// A destination waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub replace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NavigationStatus {
    Scheduled,
    Completed,
    Cancelled,
    Failed,
}

impl NavigationStatus {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Scheduled,
            1 => Self::Completed,
            2 => Self::Cancelled,
            _ => Self::Failed,
        }
    }
}

/// Status shared between a handle and its scheduled task.
#[derive(Debug)]
struct StatusCell(AtomicU8);

impl StatusCell {
    fn new() -> Arc<Self> {
        Arc::new(Self(AtomicU8::new(NavigationStatus::Scheduled as u8)))
    }

    fn get(&self) -> NavigationStatus {
        NavigationStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, status: NavigationStatus) {
        self.0.store(status as u8, Ordering::Release);
    }

    /// Leaves `Scheduled` for `next`; fails if something else got there first.
    fn claim(&self, next: NavigationStatus) -> bool {
        self.0
            .compare_exchange(
                NavigationStatus::Scheduled as u8,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

/// Handle to one scheduled soft navigation.
#[must_use = "dropping the handle keeps the navigation scheduled; call `detach` to make that explicit"]
pub struct PendingNavigation<T: Timer> {
    request: NavigationRequest,
    status: Arc<StatusCell>,
    timer: T,
    handle: T::Handle,
}

impl<T: Timer> fmt::Debug for PendingNavigation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingNavigation")
            .field("request", &self.request)
            .field("status", &self.status.get())
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl<T: Timer> PendingNavigation<T> {
    pub const fn request(&self) -> &NavigationRequest {
        &self.request
    }

    pub fn status(&self) -> NavigationStatus {
        self.status.get()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == NavigationStatus::Scheduled
    }

    /// Stops the navigation if it has not fired yet. Returns whether it did.
    pub fn cancel(&self) -> bool {
        if !self.status.claim(NavigationStatus::Cancelled) {
            return false;
        }
        self.timer.cancel(self.handle);
        true
    }

    /// Lets the navigation fire regardless of what happens to the caller.
    pub fn detach(self) {}

    /// Cancels the navigation when the current reactive owner is cleaned up,
    /// typically because the calling view unmounted.
    pub fn cancel_on_cleanup(self) {
        let status = self.status;
        // The platform timer may still fire; a claimed status makes it a no-op.
        on_cleanup(move || {
            status.claim(NavigationStatus::Cancelled);
        });
    }
}

/// Soft and hard navigation over an injected provider and timer.
pub struct Navigator<P, T> {
    provider: Rc<P>,
    timer: T,
    config: NavigationConfig,
}

impl<P, T: Clone> Clone for Navigator<P, T> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            timer: self.timer.clone(),
            config: self.config,
        }
    }
}

impl<P, T> Navigator<P, T>
where
    P: NavigationProvider + 'static,
    T: Timer,
{
    pub fn new(provider: P, timer: T, config: NavigationConfig) -> Self {
        Self {
            provider: Rc::new(provider),
            timer,
            config,
        }
    }

    pub const fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn current_path(&self) -> String {
        self.provider.current_path()
    }

    /// Schedules a client-side route change after the configured delay.
    ///
    /// With `options.replace` the current history entry is rewritten and the
    /// router is never asked to push; otherwise the router pushes a new entry.
    /// The action runs exactly once unless cancelled through the returned
    /// handle. Failures of the action are logged and surface only as
    /// [`NavigationStatus::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Timer`] when the delay cannot be scheduled;
    /// nothing will navigate in that case.
    pub fn soft_navigate(
        &self,
        path: impl Into<String>,
        options: SoftNavigateOptions,
    ) -> Result<PendingNavigation<T>, NavigationError> {
        let request = NavigationRequest {
            path: path.into(),
            replace: options.replace,
        };
        self.schedule(
            request,
            |provider, path| provider.replace_entry(path),
            |provider, path| {
                provider.push(path);
                Ok(())
            },
        )
    }

    /// Schedules a router-driven replacement of the current entry after the
    /// configured delay. Unlike a replacing [`Self::soft_navigate`], the
    /// router re-matches its routes for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Timer`] when the delay cannot be scheduled.
    pub fn soft_redirect(
        &self,
        path: impl Into<String>,
    ) -> Result<PendingNavigation<T>, NavigationError> {
        let request = NavigationRequest {
            path: path.into(),
            replace: true,
        };
        let redirect = |provider: &P, path: &str| -> Result<(), NavigationError> {
            provider.redirect(path);
            Ok(())
        };
        self.schedule(request, redirect, redirect)
    }

    fn schedule(
        &self,
        request: NavigationRequest,
        on_replace: fn(&P, &str) -> Result<(), NavigationError>,
        on_push: fn(&P, &str) -> Result<(), NavigationError>,
    ) -> Result<PendingNavigation<T>, NavigationError> {
        let status = StatusCell::new();

        let task = {
            let provider = Rc::clone(&self.provider);
            let status = Arc::clone(&status);
            let request = request.clone();
            move || {
                if !status.claim(NavigationStatus::Completed) {
                    return;
                }
                let action = if request.replace { on_replace } else { on_push };
                if let Err(err) = action(&provider, &request.path) {
                    logging::warn!("soft navigation to {} failed: {err}", request.path);
                    status.set(NavigationStatus::Failed);
                }
            }
        };

        let handle = self
            .timer
            .schedule(self.config.soft_delay(), Box::new(task))
            .inspect_err(|err| logging::error!("{err}"))?;

        Ok(PendingNavigation {
            request,
            status,
            timer: self.timer.clone(),
            handle,
        })
    }

    /// Assigns `target` to the browser location right away, reloading the page.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Location`] when the browser rejects `target`.
    pub fn hard_navigate(&self, target: &str) -> Result<(), NavigationError> {
        self.provider
            .assign_location(target)
            .inspect_err(|err| logging::warn!("hard navigation to {target} failed: {err}"))
    }
}

/// Builds a browser-backed [`Navigator`] for the surrounding `<Router/>`.
///
/// The delay comes from a [`NavigationConfig`] in context, or the default.
pub fn use_navigation() -> Navigator<BrowserNavigation, BrowserTimer> {
    let config = use_context::<NavigationConfig>().unwrap_or_default();
    Navigator::new(BrowserNavigation::from_router(), BrowserTimer, config)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use assert_matches::assert_matches;
    use mockall::predicate::eq;

    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    fn navigator(
        provider: MockNavigationProvider,
    ) -> (Navigator<MockNavigationProvider, ManualTimer>, ManualTimer) {
        let timer = ManualTimer::new();
        let navigator = Navigator::new(provider, timer.clone(), NavigationConfig::default());
        (navigator, timer)
    }

    #[test]
    fn push_waits_for_the_delay() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().with(eq("/dashboard")).times(1).return_const(());
        provider.expect_replace_entry().never();
        let (navigator, timer) = navigator(provider);

        let pending = navigator
            .soft_navigate("/dashboard", SoftNavigateOptions::default())
            .unwrap();
        assert!(pending.is_pending());

        timer.advance(DELAY - Duration::from_millis(1));
        assert!(pending.is_pending());

        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_matches!(pending.status(), NavigationStatus::Completed);
    }

    #[test]
    fn replace_bypasses_the_router() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().never();
        provider
            .expect_replace_entry()
            .with(eq("/settings"))
            .times(1)
            .returning(|_| Ok(()));
        let (navigator, timer) = navigator(provider);

        let pending = navigator
            .soft_navigate("/settings", SoftNavigateOptions::replace())
            .unwrap();
        assert_eq!(
            pending.request(),
            &NavigationRequest {
                path: "/settings".to_owned(),
                replace: true,
            }
        );

        timer.advance(DELAY);
        assert_matches!(pending.status(), NavigationStatus::Completed);
    }

    #[test]
    fn rejected_replace_marks_the_handle_failed() {
        let mut provider = MockNavigationProvider::new();
        provider
            .expect_replace_entry()
            .returning(|_| Err(NavigationError::History("SecurityError".to_owned())));
        let (navigator, timer) = navigator(provider);

        let pending = navigator
            .soft_navigate("https://elsewhere.test/", SoftNavigateOptions::replace())
            .unwrap();
        timer.advance(DELAY);

        assert_matches!(pending.status(), NavigationStatus::Failed);
    }

    #[test]
    fn cancel_prevents_the_navigation() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().never();
        let (navigator, timer) = navigator(provider);

        let pending = navigator
            .soft_navigate("/dashboard", SoftNavigateOptions::default())
            .unwrap();
        assert!(pending.cancel());
        assert!(!pending.cancel());

        assert_eq!(timer.advance(DELAY * 2), 0);
        assert_matches!(pending.status(), NavigationStatus::Cancelled);
    }

    #[test]
    fn cancel_after_firing_is_refused() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().times(1).return_const(());
        let (navigator, timer) = navigator(provider);

        let pending = navigator
            .soft_navigate("/dashboard", SoftNavigateOptions::default())
            .unwrap();
        timer.advance(DELAY);

        assert!(!pending.cancel());
        assert_matches!(pending.status(), NavigationStatus::Completed);
    }

    #[test]
    fn dropped_handle_still_navigates() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().with(eq("/later")).times(1).return_const(());
        let (navigator, timer) = navigator(provider);

        navigator
            .soft_navigate("/later", SoftNavigateOptions::default())
            .unwrap()
            .detach();
        drop(navigator);

        assert_eq!(timer.advance(DELAY), 1);
    }

    #[test]
    fn hard_navigation_is_immediate_and_exact() {
        let mut provider = MockNavigationProvider::new();
        provider
            .expect_assign_location()
            .with(eq("https://example.com/login?next=%2F"))
            .times(1)
            .returning(|_| Ok(()));
        provider.expect_push().never();
        let (navigator, timer) = navigator(provider);

        navigator
            .hard_navigate("https://example.com/login?next=%2F")
            .unwrap();
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn hard_navigation_surfaces_browser_rejection() {
        let mut provider = MockNavigationProvider::new();
        provider
            .expect_assign_location()
            .returning(|_| Err(NavigationError::Location("SyntaxError".to_owned())));
        let (navigator, _timer) = navigator(provider);

        assert_matches!(
            navigator.hard_navigate("http://[::1"),
            Err(NavigationError::Location(_))
        );
    }

    #[test]
    fn custom_delay_is_honoured() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().times(1).return_const(());
        let timer = ManualTimer::new();
        let navigator = Navigator::new(provider, timer.clone(), NavigationConfig::new(200));

        let pending = navigator
            .soft_navigate("/slow", SoftNavigateOptions::default())
            .unwrap();
        timer.advance(Duration::from_millis(199));
        assert!(pending.is_pending());
        timer.advance(Duration::from_millis(1));
        assert!(!pending.is_pending());
    }

    #[test]
    fn current_path_reads_through_to_the_provider() {
        let mut provider = MockNavigationProvider::new();
        provider
            .expect_current_path()
            .return_const("/dashboard".to_owned());
        let (navigator, _timer) = navigator(provider);

        assert_eq!(navigator.current_path(), "/dashboard");
    }

    #[test]
    fn owner_cleanup_cancels_the_navigation() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().never();
        let (navigator, timer) = navigator(provider);

        let owner = Owner::new();
        owner.with(|| {
            navigator
                .soft_navigate("/dashboard", SoftNavigateOptions::default())
                .unwrap()
                .cancel_on_cleanup();
        });
        owner.cleanup();

        timer.advance(DELAY);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn redirect_lets_the_router_replace_the_entry() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_redirect().with(eq("/")).times(1).return_const(());
        provider.expect_replace_entry().never();
        provider.expect_push().never();
        let (navigator, timer) = navigator(provider);

        let pending = navigator.soft_redirect("/").unwrap();
        assert!(pending.request().replace);
        timer.advance(DELAY - Duration::from_millis(1));
        assert!(pending.is_pending());

        timer.advance(Duration::from_millis(1));
        assert_matches!(pending.status(), NavigationStatus::Completed);
    }

    #[test]
    fn detached_navigation_survives_owner_cleanup() {
        let mut provider = MockNavigationProvider::new();
        provider.expect_push().with(eq("/dashboard")).times(1).return_const(());
        let (navigator, timer) = navigator(provider);

        let owner = Owner::new();
        owner.with(|| {
            navigator
                .soft_navigate("/dashboard", SoftNavigateOptions::default())
                .unwrap()
                .detach();
        });
        owner.cleanup();

        assert_eq!(timer.advance(DELAY), 1);
    }

    #[test]
    fn status_round_trips_through_the_cell() {
        let cell = StatusCell::new();
        assert_eq!(cell.get(), NavigationStatus::Scheduled);
        assert!(cell.claim(NavigationStatus::Completed));
        assert!(!cell.claim(NavigationStatus::Cancelled));
        cell.set(NavigationStatus::Failed);
        assert_eq!(cell.get(), NavigationStatus::Failed);
    }
}
