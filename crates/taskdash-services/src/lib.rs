pub mod client;
pub mod error;
pub mod todo;

pub use client::TodoClient;
pub use error::TodoError;
pub use todo::{Todo, TodoFields};
