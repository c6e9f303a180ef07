//! Add/edit todo form view-model.

use std::sync::Arc;
use std::time::{Duration, Instant};

use taskdash_core::AppError;
use taskdash_services::{TodoClient, TodoFields};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error_mapping::trace_failure;
use crate::navigation::Route;
use crate::notify::{Notifier, Toast};
use crate::services::{
    request_todo_create, request_todo_get, request_todo_update, TodoServiceMessage,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the todo with this id
    Edit(String),
}

pub struct TodoFormModel {
    runtime: Handle,
    tx: UnboundedSender<TodoServiceMessage>,
    rx: UnboundedReceiver<TodoServiceMessage>,
    client: Arc<TodoClient>,
    notifier: Arc<dyn Notifier>,
    toast_duration: Duration,

    mode: FormMode,
    pub fields: TodoFields,
    toast: Option<Toast>,
    submitting: bool,
    navigation: Option<Route>,
}

impl TodoFormModel {
    /// Open the form. Edit mode starts loading the todo immediately.
    pub fn new(
        runtime: Handle,
        client: Arc<TodoClient>,
        notifier: Arc<dyn Notifier>,
        toast_duration: Duration,
        mode: FormMode,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let model = Self {
            runtime,
            tx,
            rx,
            client,
            notifier,
            toast_duration,
            mode,
            fields: TodoFields::default(),
            toast: None,
            submitting: false,
            navigation: None,
        };

        if let FormMode::Edit(id) = &model.mode {
            request_todo_get(&model.runtime, &model.tx, model.client.clone(), id.clone());
        }
        model
    }

    /// Form mode for a route, `None` for screens that are not the form.
    pub fn mode_for(route: &Route) -> Option<FormMode> {
        match route {
            Route::TodoNew => Some(FormMode::Create),
            Route::TodoEdit(id) => Some(FormMode::Edit(id.clone())),
            _ => None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_valid(&self) -> bool {
        !self.fields.title.trim().is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit the form. Invalid input raises a toast and sends nothing.
    pub fn submit_at(&mut self, now: Instant) -> bool {
        if !self.is_valid() {
            let err = trace_failure(
                "todo form",
                AppError::Validation("title is blank".to_string()),
            );
            self.show_toast(err.user_message(), now);
            return false;
        }

        self.submitting = true;
        match &self.mode {
            FormMode::Create => request_todo_create(
                &self.runtime,
                &self.tx,
                self.client.clone(),
                self.fields.clone(),
            ),
            FormMode::Edit(id) => request_todo_update(
                &self.runtime,
                &self.tx,
                self.client.clone(),
                id.clone(),
                self.fields.clone(),
            ),
        }
        true
    }

    pub fn submit(&mut self) -> bool {
        self.submit_at(Instant::now())
    }

    /// Toast text if one is still visible at `now`.
    pub fn toast_at(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| t.is_visible_at(now))
            .map(|t| t.message())
    }

    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    fn show_toast(&mut self, message: &str, now: Instant) {
        self.toast = Some(Toast::new(message, now, self.toast_duration));
    }

    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg, Instant::now());
            handled += 1;
        }
        handled
    }

    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.apply(msg, Instant::now());
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, msg: TodoServiceMessage, now: Instant) {
        match msg {
            TodoServiceMessage::GetDone(result) => match result {
                Ok(todo) => self.fields = todo.fields(),
                Err(e) => {
                    trace_failure("load todo", e);
                    self.show_toast("Failed to load TODO", now);
                }
            },
            TodoServiceMessage::CreateDone(result) => {
                self.submitting = false;
                match result {
                    Ok(todo) => {
                        tracing::info!("Created todo {}", todo.id);
                        self.notifier.alert("TODO added successfully");
                        self.navigation = Some(Route::Todos);
                    }
                    Err(e) => {
                        trace_failure("create todo", e);
                        self.show_toast("Failed to add TODO", now);
                    }
                }
            }
            TodoServiceMessage::UpdateDone(result) => {
                self.submitting = false;
                match result {
                    Ok(todo) => {
                        tracing::info!("Updated todo {}", todo.id);
                        self.notifier.alert("TODO updated successfully");
                        self.navigation = Some(Route::Todos);
                    }
                    Err(e) => {
                        trace_failure("update todo", e);
                        self.show_toast("Failed to update TODO", now);
                    }
                }
            }
            other => tracing::warn!("Todo form ignored unexpected message: {:?}", other),
        }
    }
}
