use std::sync::Arc;

use crate::catalog::DatasetCatalog;
use crate::config::ServerConfig;
use crate::mesh::BoundaryRule;
use crate::store::MeshStore;
use crate::utils::parser_registry::SourceRegistry;

/// 全局应用状态，负责在各个 handler 之间共享读取器、数据目录与网格缓存
pub struct AppState {
    pub source_registry: Arc<SourceRegistry>,
    pub catalog: DatasetCatalog,
    pub mesh_store: Arc<MeshStore>,
    pub default_rule: BoundaryRule,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            source_registry: Arc::new(SourceRegistry::new()),
            catalog: DatasetCatalog::new(config.mesh_dir.clone()),
            mesh_store: Arc::new(MeshStore::with_ttl(config.mesh_ttl)),
            default_rule: config.boundary_rule,
        }
    }
}
