//! Screen routes and the authentication guard.

use std::sync::Arc;

use taskdash_auth::Session;

/// Every screen the dashboard can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Todos,
    TodoNew,
    TodoEdit(String),
    TodoDetail(String),
    Weather,
    Map,
}

impl Route {
    /// Resolve a path. Unknown paths fall back to the login screen and
    /// `dashboard` alone lands on the todo list.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["login"] => Route::Login,
            ["dashboard"] | ["dashboard", "todos"] => Route::Todos,
            ["dashboard", "todos", "new"] => Route::TodoNew,
            ["dashboard", "todos", "edit", id] => Route::TodoEdit((*id).to_string()),
            ["dashboard", "todos", id] => Route::TodoDetail((*id).to_string()),
            ["dashboard", "weather"] => Route::Weather,
            ["dashboard", "map"] => Route::Map,
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Todos => "/dashboard/todos".to_string(),
            Route::TodoNew => "/dashboard/todos/new".to_string(),
            Route::TodoEdit(id) => format!("/dashboard/todos/edit/{}", id),
            Route::TodoDetail(id) => format!("/dashboard/todos/{}", id),
            Route::Weather => "/dashboard/weather".to_string(),
            Route::Map => "/dashboard/map".to_string(),
        }
    }

    /// All dashboard screens sit behind the guard.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Tracks the current screen and applies the guard on every navigation.
pub struct Navigator {
    session: Arc<Session>,
    current: Route,
}

impl Navigator {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            current: Route::Login,
        }
    }

    /// Navigate, redirecting to login when the target needs a session
    /// that does not exist. The check is repeated on every call.
    pub fn navigate(&mut self, target: Route) -> &Route {
        let resolved = if target.requires_auth() && !self.session.is_authenticated() {
            tracing::info!("Guard redirected {} to login", target.path());
            Route::Login
        } else {
            target
        };

        tracing::debug!("Navigated to {}", resolved.path());
        self.current = resolved;
        &self.current
    }

    pub fn navigate_path(&mut self, path: &str) -> &Route {
        self.navigate(Route::parse(path))
    }

    pub fn current(&self) -> &Route {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdash_auth::{AuthClient, LocalStorage, TOKEN_KEY};

    #[test]
    fn test_parse_route_table() {
        assert_eq!(Route::parse(""), Route::Login);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/dashboard"), Route::Todos);
        assert_eq!(Route::parse("/dashboard/todos"), Route::Todos);
        assert_eq!(Route::parse("/dashboard/todos/new"), Route::TodoNew);
        assert_eq!(
            Route::parse("/dashboard/todos/edit/12"),
            Route::TodoEdit("12".into())
        );
        assert_eq!(
            Route::parse("dashboard/todos/12/"),
            Route::TodoDetail("12".into())
        );
        assert_eq!(Route::parse("/dashboard/weather"), Route::Weather);
        assert_eq!(Route::parse("/dashboard/map"), Route::Map);
        assert_eq!(Route::parse("/nowhere"), Route::Login);
        assert_eq!(Route::parse("/dashboard/todos/edit"), Route::TodoDetail("edit".into()));
    }

    #[test]
    fn test_path_round_trips() {
        for route in [
            Route::Login,
            Route::Todos,
            Route::TodoNew,
            Route::TodoEdit("a1".into()),
            Route::TodoDetail("b2".into()),
            Route::Weather,
            Route::Map,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guard_rechecks_every_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let session = Arc::new(Session::new(
            LocalStorage::new(&path),
            AuthClient::new("http://localhost:9"),
        ));
        let mut navigator = Navigator::new(session.clone());

        assert_eq!(navigator.navigate(Route::Weather), &Route::Login);

        LocalStorage::new(&path).set_item(TOKEN_KEY, "tok").unwrap();
        assert_eq!(navigator.navigate(Route::Weather), &Route::Weather);

        session.logout().unwrap();
        assert_eq!(navigator.navigate_path("/dashboard/map"), &Route::Login);
        assert_eq!(navigator.navigate(Route::Login), &Route::Login);
    }
}
