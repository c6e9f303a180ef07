use std::sync::Arc;

use taskdash_services::{Todo, TodoClient};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::error_mapping::trace_failure;
use crate::notify::Notifier;
use crate::services::{request_todo_get, TodoServiceMessage};

/// Read-only view of one todo.
pub struct TodoDetailModel {
    rx: UnboundedReceiver<TodoServiceMessage>,
    notifier: Arc<dyn Notifier>,
    id: String,
    todo: Option<Todo>,
}

impl TodoDetailModel {
    /// Open the screen and start loading `id`.
    pub fn open(
        runtime: &Handle,
        client: Arc<TodoClient>,
        notifier: Arc<dyn Notifier>,
        id: &str,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        request_todo_get(runtime, &tx, client, id.to_string());
        Self {
            rx,
            notifier,
            id: id.to_string(),
            todo: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn todo(&self) -> Option<&Todo> {
        self.todo.as_ref()
    }

    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            handled += 1;
        }
        handled
    }

    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, msg: TodoServiceMessage) {
        match msg {
            TodoServiceMessage::GetDone(Ok(todo)) => self.todo = Some(todo),
            TodoServiceMessage::GetDone(Err(e)) => {
                trace_failure("todo details", e);
                self.notifier.alert("Failed to fetch details");
            }
            other => tracing::warn!("Todo detail ignored unexpected message: {:?}", other),
        }
    }
}
