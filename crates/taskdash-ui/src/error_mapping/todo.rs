use taskdash_core::{AppError, AuthError as CoreAuthError, ReqwestErrorExt};
use taskdash_services::TodoError;

use super::IntoAppError;

impl IntoAppError for TodoError {
    fn into_app_error(self) -> AppError {
        match self {
            TodoError::Unauthorized(_) => AppError::Auth(CoreAuthError::Unauthorized),
            TodoError::NotFound(id) => AppError::NotFound(format!("todo {}", id)),
            TodoError::ApiError(s) => AppError::Service(s),
            TodoError::Network(e) => AppError::Network(e.into_network_error()),
        }
    }
}
