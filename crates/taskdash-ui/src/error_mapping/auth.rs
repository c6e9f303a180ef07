use taskdash_auth::{AuthError, StorageError};
use taskdash_core::{AppError, AuthError as CoreAuthError, ReqwestErrorExt};

use super::IntoAppError;

impl IntoAppError for AuthError {
    fn into_app_error(self) -> AppError {
        match self {
            AuthError::Rejected(_) | AuthError::MissingToken => {
                AppError::Auth(CoreAuthError::LoginRejected)
            }
            AuthError::Network(e) => AppError::Network(e.into_network_error()),
            AuthError::Storage(e) => e.into_app_error(),
        }
    }
}

impl IntoAppError for StorageError {
    fn into_app_error(self) -> AppError {
        AppError::Auth(CoreAuthError::StorageError(self.to_string()))
    }
}
