use std::sync::Arc;

use taskdash_auth::Session;

use crate::error_mapping::trace_failure;
use crate::navigation::Route;
use crate::notify::Notifier;

/// Dashboard shell: navigation menu and logout.
pub struct DashboardModel {
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    mobile_menu_open: bool,
}

impl DashboardModel {
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            mobile_menu_open: false,
        }
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Clear the token and go to login unconditionally.
    ///
    /// A token that could not be removed is reported; the guard still sees it.
    pub fn logout(&mut self) -> Route {
        if let Err(e) = self.session.logout() {
            let err = trace_failure("logout", e);
            self.notifier.alert(err.user_message());
        }
        self.mobile_menu_open = false;
        Route::Login
    }
}
