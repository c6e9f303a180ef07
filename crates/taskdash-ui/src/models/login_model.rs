//! Login screen view-model.

use std::sync::Arc;

use taskdash_auth::Session;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error_mapping::trace_failure;
use crate::navigation::Route;
use crate::notify::Notifier;
use crate::services::{request_login, AuthServiceMessage};

const LOGIN_FAILED: &str = "Login failed";

pub struct LoginModel {
    runtime: Handle,
    tx: UnboundedSender<AuthServiceMessage>,
    rx: UnboundedReceiver<AuthServiceMessage>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,

    pub username: String,
    pub password: String,
    loading: bool,
    navigation: Option<Route>,
}

impl LoginModel {
    pub fn new(runtime: Handle, session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            tx,
            rx,
            session,
            notifier,
            username: String::new(),
            password: String::new(),
            loading: false,
            navigation: None,
        }
    }

    /// Send the credentials. Returns false without a request when a field is empty.
    pub fn submit(&mut self) -> bool {
        if self.username.is_empty() || self.password.is_empty() {
            return false;
        }

        self.loading = true;
        request_login(
            &self.runtime,
            &self.tx,
            self.session.clone(),
            self.username.clone(),
            self.password.clone(),
        );
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Screen to show next, if a completed login asked for one.
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    /// Apply every completed request without blocking.
    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            handled += 1;
        }
        handled
    }

    /// Wait for the next completed request and apply it.
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, msg: AuthServiceMessage) {
        match msg {
            AuthServiceMessage::LoginDone(result) => {
                self.loading = false;
                match result {
                    Ok(()) => self.navigation = Some(Route::Todos),
                    Err(e) => {
                        trace_failure("login", e);
                        self.notifier.alert(LOGIN_FAILED);
                    }
                }
            }
        }
    }
}
