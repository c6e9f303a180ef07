//! Folds crate-level errors into taskdash_core::AppError so every failure gets
//! one diagnostic trace and one UI-safe message.
//! Each domain has its own module to keep mappings small and readable.

mod auth;
mod maps;
mod todo;
mod weather;

use taskdash_core::AppError;

/// Conversion into the application error.
///
/// A local trait because neither side of the conversion is defined here.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}

impl IntoAppError for AppError {
    fn into_app_error(self) -> AppError {
        self
    }
}

/// Log a failed operation with its technical detail and return the app error.
pub fn trace_failure<E>(context: &str, err: E) -> AppError
where
    E: IntoAppError + std::fmt::Display,
{
    let detail = err.to_string();
    let app_err = err.into_app_error();
    tracing::error!(
        context,
        detail = %detail,
        user_message = app_err.user_message(),
        "Operation failed"
    );
    app_err
}
