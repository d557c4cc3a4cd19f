pub mod api;
pub mod auth;
pub mod error;
pub mod state;

use anyhow::Result;
use salvo::conn::TcpListener;
use salvo::serve_static::StaticDir;
use salvo::{Listener, Router, Server};
use sked_core::db;
use sked_core::repository::SqliteRepository;
use std::sync::Arc;

use crate::config::Config;
use auth::AuthMiddleware;
use state::{ConfigHandler, RepositoryHandler, SharedRepository};

/// Builds the full router: the JSON API under `/api` and the web front-end
/// for everything else.
pub fn router(config: Arc<Config>, repository: SharedRepository) -> Router {
    let web_dir = config.web_dir.clone();

    Router::new()
        .hoop(RepositoryHandler { repository })
        .hoop(ConfigHandler { config })
        .push(api_routes())
        .push(Router::with_path("{**path}").get(StaticDir::new([web_dir]).defaults("index.html")))
}

fn api_routes() -> Router {
    Router::with_path("api")
        .push(Router::with_path("nextdate").get(api::next_date_handler))
        .push(Router::with_path("signin").post(auth::sign_in))
        .push(
            Router::new()
                .hoop(AuthMiddleware)
                .push(
                    Router::with_path("task")
                        .get(api::get_task)
                        .post(api::add_task)
                        .put(api::update_task)
                        .delete(api::delete_task)
                        .push(Router::with_path("done").post(api::task_done)),
                )
                .push(Router::with_path("tasks").get(api::list_tasks)),
        )
}

/// Opens the database and serves until the process is stopped.
pub async fn serve(config: Config) -> Result<()> {
    let pool = db::establish_connection(&config.dbfile).await?;
    tracing::info!(dbfile = %config.dbfile, "Database connection pool created");

    let repository: SharedRepository = Arc::new(SqliteRepository::new(pool));
    let bind_addr = format!("{}:{}", config.host, config.port);
    if config.password().is_none() {
        tracing::warn!("No password configured; the task API is open");
    }

    let router = router(Arc::new(config), repository);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    tracing::info!("Server listening on http://{bind_addr}/");
    Server::new(acceptor).serve(router).await;

    Ok(())
}

#[cfg(test)]
mod tests;
