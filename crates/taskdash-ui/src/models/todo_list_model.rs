//! Todo list screen view-model.

use std::sync::Arc;

use taskdash_services::{Todo, TodoClient};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error_mapping::trace_failure;
use crate::navigation::Route;
use crate::notify::Notifier;
use crate::services::{request_todo_delete, request_todo_fetch, TodoServiceMessage};

const DELETE_PROMPT: &str = "Are you sure you want to delete this TODO?";

pub struct TodoListModel {
    runtime: Handle,
    tx: UnboundedSender<TodoServiceMessage>,
    rx: UnboundedReceiver<TodoServiceMessage>,
    client: Arc<TodoClient>,
    notifier: Arc<dyn Notifier>,

    todos: Vec<Todo>,
    loading: bool,
    /// Todo shown in the view modal
    selected: Option<Todo>,
}

impl TodoListModel {
    pub fn new(runtime: Handle, client: Arc<TodoClient>, notifier: Arc<dyn Notifier>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            tx,
            rx,
            client,
            notifier,
            todos: Vec::new(),
            loading: false,
            selected: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the full list.
    pub fn load(&mut self) {
        self.loading = true;
        request_todo_fetch(&self.runtime, &self.tx, self.client.clone());
    }

    /// Delete after confirmation. Returns false when the user declined.
    pub fn delete(&mut self, id: &str) -> bool {
        if !self.notifier.confirm(DELETE_PROMPT) {
            return false;
        }

        self.loading = true;
        request_todo_delete(&self.runtime, &self.tx, self.client.clone(), id.to_string());
        true
    }

    pub fn view(&self, id: &str) -> Route {
        Route::TodoDetail(id.to_string())
    }

    pub fn add(&self) -> Route {
        Route::TodoNew
    }

    pub fn edit(&self, id: &str) -> Route {
        Route::TodoEdit(id.to_string())
    }

    pub fn open_view_modal(&mut self, todo: Todo) {
        self.selected = Some(todo);
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    pub fn is_modal_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Todo> {
        self.selected.as_ref()
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
            TodoServiceMessage::FetchDone(result) => {
                self.loading = false;
                match result {
                    Ok(todos) => {
                        tracing::debug!("Loaded {} todos", todos.len());
                        self.todos = todos;
                    }
                    Err(e) => {
                        trace_failure("load todos", e);
                        self.notifier.alert("Failed to load TODOs");
                    }
                }
            }
            TodoServiceMessage::DeleteDone { id, result } => match result {
                Ok(()) => {
                    tracing::info!("Deleted todo {}", id);
                    self.load();
                }
                Err(e) => {
                    self.loading = false;
                    trace_failure("delete todo", e);
                    self.notifier.alert("Failed to delete TODO");
                }
            },
            other => tracing::warn!("Todo list ignored unexpected message: {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeNotifier;
    use taskdash_auth::TokenProvider;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedToken;

    impl TokenProvider for FixedToken {
        fn token(&self) -> Option<String> {
            Some("tok".into())
        }
    }

    fn model_for(server: &MockServer, notifier: Arc<FakeNotifier>) -> TodoListModel {
        let client = Arc::new(TodoClient::new(&server.uri(), Arc::new(FixedToken)));
        TodoListModel::new(Handle::current(), client, notifier)
    }

    fn todos_json() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "title": "Buy milk", "description": "2L", "isCompleted": false},
            {"id": 2, "title": "Walk dog", "description": "", "isCompleted": true}
        ])
    }

    #[tokio::test]
    async fn test_load_sets_and_clears_loading() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(todos_json()))
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server, FakeNotifier::answering(true));
        model.load();
        assert!(model.is_loading());
        model.process_next().await;

        assert!(!model.is_loading());
        assert_eq!(model.todos().len(), 2);
        assert_eq!(model.todos()[0].id, "1");
    }

    #[tokio::test]
    async fn test_load_failure_alerts() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let notifier = FakeNotifier::answering(true);
        let mut model = model_for(&mock_server, notifier.clone());
        model.load();
        model.process_next().await;

        assert!(!model.is_loading());
        assert!(model.todos().is_empty());
        assert_eq!(notifier.alerts(), vec!["Failed to load TODOs".to_string()]);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(todos_json()))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let notifier = FakeNotifier::answering(false);
        let mut model = model_for(&mock_server, notifier.clone());
        model.load();
        model.process_next().await;

        assert!(!model.delete("1"));
        assert!(!model.is_loading());
        assert_eq!(model.poll_channel(), 0);
        assert_eq!(model.todos().len(), 2);
        assert_eq!(
            notifier.prompts(),
            vec!["Are you sure you want to delete this TODO?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads_list() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/todos/1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 2, "title": "Walk dog", "description": "", "isCompleted": true}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server, FakeNotifier::answering(true));
        assert!(model.delete("1"));
        model.process_next().await;
        assert!(model.is_loading());
        model.process_next().await;

        assert!(!model.is_loading());
        assert_eq!(model.todos().len(), 1);
        assert_eq!(model.todos()[0].id, "2");
    }

    #[tokio::test]
    async fn test_delete_failure_alerts() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let notifier = FakeNotifier::answering(true);
        let mut model = model_for(&mock_server, notifier.clone());
        model.delete("9");
        model.process_next().await;

        assert!(!model.is_loading());
        assert_eq!(notifier.alerts(), vec!["Failed to delete TODO".to_string()]);
    }

    #[tokio::test]
    async fn test_navigation_helpers_and_modal() {
        let mock_server = MockServer::start().await;
        let mut model = model_for(&mock_server, FakeNotifier::answering(true));

        assert_eq!(model.view("3"), Route::TodoDetail("3".into()));
        assert_eq!(model.add(), Route::TodoNew);
        assert_eq!(model.edit("3"), Route::TodoEdit("3".into()));

        let todo = Todo {
            id: "3".into(),
            title: "Read".into(),
            description: String::new(),
            is_completed: false,
        };
        model.open_view_modal(todo.clone());
        assert!(model.is_modal_open());
        assert_eq!(model.selected(), Some(&todo));
        model.close_modal();
        assert!(!model.is_modal_open());
    }
}
