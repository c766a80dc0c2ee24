use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use expensebook_core::{
    categories::{Category, CategoryRepositoryTrait, CategoryService},
    events::DomainEventSink,
    expenses::ExpenseService,
};
use expensebook_storage_sqlite::{
    categories::CategoryRepository, db, expenses::ExpenseRepository,
};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub category_repository: Arc<CategoryRepository>,
    pub category_service: Arc<CategoryService>,
    pub expense_service: Arc<ExpenseService>,
}

impl AppState {
    /// Looks up a category so rejections cite the stored record. Unknown ids
    /// yield an id-only category and the service reports them.
    pub fn resolve_category(&self, category_id: &str) -> anyhow::Result<Category> {
        Ok(self
            .category_repository
            .find_by_id(category_id)?
            .unwrap_or_else(|| Category::default().with_id(category_id)))
    }
}

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs share the terminal with command output, so they go to stderr.
    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_state<S>(config: &Config, sink: S) -> anyhow::Result<AppState>
where
    S: DomainEventSink + Clone + 'static,
{
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let category_repository = Arc::new(CategoryRepository::new(pool.clone()));
    let expense_repository = Arc::new(ExpenseRepository::new(pool));

    let category_service = Arc::new(CategoryService::new(
        category_repository.clone(),
        expense_repository.clone(),
        Arc::new(sink.clone()),
    ));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repository,
        category_repository.clone(),
        Arc::new(sink),
    ));

    Ok(AppState {
        category_repository,
        category_service,
        expense_service,
    })
}
