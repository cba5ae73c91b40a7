//! Navigation guard

use serde::{Deserialize, Serialize};

use crate::{
    AuthState, Route, RouteTable, SessionLoader, LOGIN_ROUTE, REDIRECT_PARAM, USER_CENTER_ROUTE,
};

/// Where to send a refused navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    /// Route name
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
}

impl RedirectTarget {
    /// Login page remembering where the user was headed
    pub fn login(destination: &str) -> Self {
        Self {
            name: LOGIN_ROUTE.to_string(),
            query: vec![(REDIRECT_PARAM.to_string(), destination.to_string())],
        }
    }

    pub fn user_center() -> Self {
        Self {
            name: USER_CENTER_ROUTE.to_string(),
            query: Vec::new(),
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Redirect(RedirectTarget),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide a navigation to `route` at `full_path`.
///
/// Protected routes need an authenticated session, otherwise the user goes
/// to login with `full_path` as the `redirect` parameter. Guest-only routes
/// send authenticated sessions to the user center.
pub fn can_enter(route: &Route, full_path: &str, auth_state: &AuthState) -> Decision {
    if route.meta.requires_auth && !auth_state.is_authenticated {
        return Decision::Redirect(RedirectTarget::login(full_path));
    }
    if route.meta.requires_guest && auth_state.is_authenticated {
        return Decision::Redirect(RedirectTarget::user_center());
    }
    Decision::Allow
}

/// Route table plus the fallback for sessions not yet initialised
pub struct AuthGate<L> {
    routes: RouteTable,
    loader: L,
}

impl<L: SessionLoader> AuthGate<L> {
    pub fn new(routes: RouteTable, loader: L) -> Self {
        Self { routes, loader }
    }

    pub fn standard(loader: L) -> Self {
        Self::new(RouteTable::standard(), loader)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Live state when present, otherwise the persisted snapshot
    pub fn resolve_state(&self, live: Option<&AuthState>) -> AuthState {
        match live {
            Some(state) => state.clone(),
            None => {
                let state = self
                    .loader
                    .load()
                    .map(|s| AuthState::from_snapshot(&s))
                    .unwrap_or_default();
                log::debug!(
                    "No live session, snapshot says authenticated={}",
                    state.is_authenticated
                );
                state
            }
        }
    }

    /// Decide a navigation to `full_path`. Paths outside the table are allowed.
    pub fn check(&self, full_path: &str, live: Option<&AuthState>) -> Decision {
        let Some(route) = self.routes.find_by_path(full_path) else {
            log::debug!("No route for {}, allowing", full_path);
            return Decision::Allow;
        };

        let state = self.resolve_state(live);
        let decision = can_enter(route, full_path, &state);
        if let Decision::Redirect(target) = &decision {
            log::info!("Navigation to {} redirected to {}", full_path, target.name);
        }
        decision
    }
}
