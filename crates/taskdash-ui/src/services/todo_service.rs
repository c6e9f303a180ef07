//! Todo backend: async CRUD calls against the todo API.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use taskdash_services::{Todo, TodoClient, TodoError, TodoFields};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum TodoServiceMessage {
    /// Result of fetching the full list
    FetchDone(Result<Vec<Todo>, TodoError>),
    /// Result of fetching one todo
    GetDone(Result<Todo, TodoError>),
    CreateDone(Result<Todo, TodoError>),
    UpdateDone(Result<Todo, TodoError>),
    /// Result of deleting the todo with this id
    DeleteDone {
        id: String,
        result: Result<(), TodoError>,
    },
}

/// Request the todo list. Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    runtime: &Handle,
    tx: &UnboundedSender<TodoServiceMessage>,
    client: Arc<TodoClient>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.list().await;
        let _ = tx.send(TodoServiceMessage::FetchDone(result));
    });
}

/// Request one todo by id. Sends `GetDone` on the channel when complete.
pub fn request_get(
    runtime: &Handle,
    tx: &UnboundedSender<TodoServiceMessage>,
    client: Arc<TodoClient>,
    id: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.get(&id).await;
        let _ = tx.send(TodoServiceMessage::GetDone(result));
    });
}

/// Request creation of a todo. Sends `CreateDone` on the channel when complete.
pub fn request_create(
    runtime: &Handle,
    tx: &UnboundedSender<TodoServiceMessage>,
    client: Arc<TodoClient>,
    fields: TodoFields,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.create(&fields).await;
        let _ = tx.send(TodoServiceMessage::CreateDone(result));
    });
}

/// Request a full replacement of a todo. Sends `UpdateDone` on the channel when complete.
pub fn request_update(
    runtime: &Handle,
    tx: &UnboundedSender<TodoServiceMessage>,
    client: Arc<TodoClient>,
    id: String,
    fields: TodoFields,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.update(&id, &fields).await;
        let _ = tx.send(TodoServiceMessage::UpdateDone(result));
    });
}

/// Request deletion of a todo. Sends `DeleteDone` on the channel when complete.
pub fn request_delete(
    runtime: &Handle,
    tx: &UnboundedSender<TodoServiceMessage>,
    client: Arc<TodoClient>,
    id: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.delete(&id).await;
        let _ = tx.send(TodoServiceMessage::DeleteDone { id, result });
    });
}
