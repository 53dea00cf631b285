//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todos_core` linkage and that the configured store loads.
//! - Keep output deterministic for quick local sanity checks.

use log::info;
use todos_core::{
    init_logging_from_config, InMemoryNotificationCenter, TodoService, TodoStore, TodosConfig,
};

fn main() {
    println!("todos_core ping={}", todos_core::ping());
    println!("todos_core version={}", todos_core::core_version());

    let config = match TodosConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("todos_core config error={err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("todos_core logging disabled error={err}");
    }

    let service = TodoService::new(
        TodoStore::open_default(&config),
        InMemoryNotificationCenter::new(),
    );
    service.bootstrap();

    info!(
        "event=smoke_check module=cli status=ok count={}",
        service.store().len()
    );
    println!("todos_core store={}", service.store().path().display());
    println!("todos_core count={}", service.todos().len());
    for row in service.rows() {
        println!("{}\t{}\t{}", row.id, row.title, row.due_label);
    }
}
