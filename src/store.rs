use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use uuid::Uuid;

use crate::pipeline::SurfaceMesh;

/// 缓存中的网格，构建完成后只读共享
pub struct CachedMesh {
    pub mesh: Arc<SurfaceMesh>,
    /// 创建时间，用于 TTL 过期检查
    pub created_at: Instant,
}

/// 已构建的表面网格缓存
/// 重新解码和提取代价很高，同一网格的多个时间步请求共享同一份数据
pub struct MeshStore {
    meshes: RwLock<HashMap<String, CachedMesh>>,
    /// TTL（Time-To-Live）默认过期时间：30 分钟
    default_ttl: Duration,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(30 * 60))
    }

    /// 创建带自定义 TTL 的 MeshStore
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            meshes: RwLock::new(HashMap::new()),
            default_ttl: ttl,
        }
    }

    /// 存入网格并返回新的 mesh_id
    pub fn insert(&self, mesh: SurfaceMesh) -> String {
        let mesh_id = Uuid::new_v4().to_string();
        self.meshes.write().insert(
            mesh_id.clone(),
            CachedMesh {
                mesh: Arc::new(mesh),
                created_at: Instant::now(),
            },
        );
        mesh_id
    }

    pub fn get(&self, mesh_id: &str) -> Option<Arc<SurfaceMesh>> {
        self.meshes.read().get(mesh_id).map(|entry| entry.mesh.clone())
    }

    pub fn remove(&self, mesh_id: &str) -> bool {
        self.meshes.write().remove(mesh_id).is_some()
    }

    /// 清理过期的网格
    /// 返回清理的数量；仍被请求持有的 Arc 不受影响
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut meshes = self.meshes.write();
        let before_count = meshes.len();

        meshes.retain(|_, entry| now.duration_since(entry.created_at) < self.default_ttl);

        before_count - meshes.len()
    }

    /// 获取当前缓存的网格数量
    pub fn len(&self) -> usize {
        self.meshes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.read().is_empty()
    }

    /// 获取默认 TTL
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl Default for MeshStore {
    fn default() -> Self {
        Self::new()
    }
}
