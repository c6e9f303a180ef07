//! Auth backend: login runs off the UI thread; the result comes back over a channel.

use std::sync::Arc;

use taskdash_auth::{AuthError, Session};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum AuthServiceMessage {
    /// Result of posting credentials. On success the token is already stored.
    LoginDone(Result<(), AuthError>),
}

/// Request a login. Sends `LoginDone` on the channel when complete.
pub fn request_login(
    runtime: &Handle,
    tx: &UnboundedSender<AuthServiceMessage>,
    session: Arc<Session>,
    username: String,
    password: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = session.login(&username, &password).await;
        let _ = tx.send(AuthServiceMessage::LoginDone(result));
    });
}
