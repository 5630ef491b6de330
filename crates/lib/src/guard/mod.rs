//! Route guarding
//!
//! Pure consumer of the session snapshot: given the current [`SessionStatus`]
//! and the kind of route being viewed, decide whether to render, hold, or
//! redirect. The guard holds no session state of its own - callers re-run
//! [`RouteGuard::evaluate`] on every snapshot change.

use tokio::sync::watch;

use crate::{
    constants::{DASHBOARD_ROUTE, LOGIN_ROUTE},
    session::{SessionSnapshot, SessionStatus},
};

/// Access class of the route being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Anyone may view (listings, agents, marketing pages).
    Public,
    /// Requires an authenticated session (dashboard, saved properties).
    Protected,
    /// Only sensible without a session (login, register).
    AuthOnly,
}

/// What the caller should do with the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Render nothing yet; the session is still initializing. Avoids both
    /// redirect flicker and prematurely bouncing an authenticated visitor.
    Hold,
    /// Render the route.
    Allow,
    /// Navigate to the given path instead of rendering.
    Redirect(String),
}

/// Redirect policy for protected and auth-only routes.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    landing_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(LOGIN_ROUTE, DASHBOARD_ROUTE)
    }
}

impl RouteGuard {
    /// Create a guard with explicit redirect targets.
    ///
    /// # Arguments
    /// * `login_path` - where unauthenticated visitors of protected routes go
    /// * `landing_path` - where authenticated visitors of auth-only routes go
    pub fn new(login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            landing_path: landing_path.into(),
        }
    }

    /// Decide what to do with a route under the given session status.
    pub fn evaluate(&self, status: SessionStatus, route: RouteKind) -> GuardVerdict {
        match (status, route) {
            (SessionStatus::Initializing, _) => GuardVerdict::Hold,
            (SessionStatus::Unauthenticated, RouteKind::Protected) => {
                GuardVerdict::Redirect(self.login_path.clone())
            }
            (SessionStatus::Authenticated, RouteKind::AuthOnly) => {
                GuardVerdict::Redirect(self.landing_path.clone())
            }
            _ => GuardVerdict::Allow,
        }
    }

    /// Await the first settled verdict for a route.
    ///
    /// Holds while the session is initializing, then returns the verdict for
    /// the first settled status. Callers that stay on the route keep watching
    /// the receiver and re-run [`evaluate`](Self::evaluate) on every change.
    pub async fn resolve(
        &self,
        changes: &mut watch::Receiver<SessionSnapshot>,
        route: RouteKind,
    ) -> GuardVerdict {
        loop {
            let verdict = self.evaluate(changes.borrow_and_update().status, route);
            if verdict != GuardVerdict::Hold {
                return verdict;
            }
            if changes.changed().await.is_err() {
                // Synchronizer gone while initializing; fail closed.
                return self.evaluate(SessionStatus::Unauthenticated, route);
            }
        }
    }
}
