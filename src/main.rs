use std::sync::Arc;

use anyhow::Result;
use taskdash_ui::{AppServices, Route, TracingNotifier};

fn main() -> Result<()> {
    // Initialize core
    taskdash_core::init()?;

    // Create and initialize application
    let mut app = taskdash_core::App::new()?;
    app.initialize()?;

    tracing::info!("Taskdash started");

    let services = AppServices::new(app.shared_config(), Arc::new(TracingNotifier))?;

    println!("Taskdash - tasks, weather and routes");
    println!("  Config directory: {}", app.config().config_dir.display());
    println!("  Todo API: {}", app.config().services.api_base_url);

    let mut navigator = services.navigator();
    match navigator.navigate_path("/dashboard").clone() {
        Route::Todos => {
            let mut list = services.todo_list_model();
            list.load();
            services.block_on(list.process_next());
            println!("  Todos: {}", list.todos().len());
            for todo in list.todos() {
                let mark = if todo.is_completed { "x" } else { " " };
                println!("    [{}] {} {}", mark, todo.id, todo.title);
            }
        }
        other => println!("  Not signed in; showing {}", other.path()),
    }

    // Graceful shutdown
    services.shutdown();
    app.shutdown()?;

    Ok(())
}
