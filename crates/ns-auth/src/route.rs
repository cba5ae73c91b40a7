//! Routes and the site route table

use serde::{Deserialize, Serialize};

/// Route name of the login page
pub const LOGIN_ROUTE: &str = "login";
/// Route name of the user center
pub const USER_CENTER_ROUTE: &str = "user";
/// Query parameter carrying the original destination to the login page
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
    /// Only signed-in sessions may enter
    pub requires_auth: bool,
    /// Only guests may enter (login, register)
    pub requires_guest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl Route {
    pub fn public(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            meta: RouteMeta::default(),
        }
    }

    pub fn auth_only(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            meta: RouteMeta {
                requires_auth: true,
                requires_guest: false,
            },
            ..Self::public(path, name)
        }
    }

    pub fn guest_only(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            meta: RouteMeta {
                requires_auth: false,
                requires_guest: true,
            },
            ..Self::public(path, name)
        }
    }
}

/// Path part of a full path, without query string or hash
pub fn route_path(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    &full_path[..end]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The site's pages
    pub fn standard() -> Self {
        Self::new(vec![
            Route::public("/", "home"),
            Route::public("/drops", "drops"),
            Route::public("/equipment", "equipment"),
            Route::public("/crafting", "crafting"),
            Route::public("/ranking", "ranking"),
            Route::guest_only("/login", LOGIN_ROUTE),
            Route::guest_only("/register", "register"),
            Route::auth_only("/user", USER_CENTER_ROUTE),
            Route::auth_only("/lottery", "lottery"),
            Route::auth_only("/horse-race", "horse-race"),
        ])
    }

    /// Match a full path; query and hash are ignored
    pub fn find_by_path(&self, full_path: &str) -> Option<&Route> {
        let path = route_path(full_path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
