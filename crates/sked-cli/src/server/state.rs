use salvo::async_trait;
use sked_core::repository::Repository;
use std::sync::Arc;

use crate::config::Config;
use crate::server::error::{ApiError, ApiResult};

pub type SharedRepository = Arc<dyn Repository>;

pub struct RepositoryHandler {
    pub repository: SharedRepository,
}

#[async_trait]
impl salvo::Handler for RepositoryHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.repository.clone());
    }
}

pub struct ConfigHandler {
    pub config: Arc<Config>,
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.config.clone());
    }
}

/// Retrieves the task repository injected by [`RepositoryHandler`].
pub fn get_repo_from_depot(depot: &salvo::Depot) -> ApiResult<SharedRepository> {
    depot
        .obtain::<SharedRepository>()
        .cloned()
        .map_err(|_err| ApiError::Invariant("Repository not found in depot"))
}

/// Retrieves the configuration injected by [`ConfigHandler`].
pub fn get_config_from_depot(depot: &salvo::Depot) -> ApiResult<Arc<Config>> {
    depot
        .obtain::<Arc<Config>>()
        .cloned()
        .map_err(|_err| ApiError::Invariant("Configuration not found in depot"))
}
