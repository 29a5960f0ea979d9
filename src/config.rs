use std::path::PathBuf;
use std::time::Duration;

use crate::mesh::BoundaryRule;

/// 服务配置
/// 默认值可以被环境变量覆盖：
/// - `FEM_GL_HOST` 监听地址
/// - `FEM_GL_PORT` 端口
/// - `FEM_GL_MESH_DIR` 网格数据根目录
/// - `FEM_GL_MESH_TTL_SECS` 网格缓存过期时间（秒）
/// - `FEM_GL_BOUNDARY_RULE` 默认边界规则 (occurrence_weight / shared_face)
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mesh_dir: PathBuf,
    pub mesh_ttl: Duration,
    pub boundary_rule: BoundaryRule,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8008,
            mesh_dir: PathBuf::from("meshes"),
            mesh_ttl: Duration::from_secs(30 * 60),
            boundary_rule: BoundaryRule::OccurrenceWeight,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值来源构建配置，未设置的键保留默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(host) = lookup("FEM_GL_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("FEM_GL_PORT") {
            config.port = port
                .parse()
                .map_err(|e| format!("FEM_GL_PORT 无效 '{}': {}", port, e))?;
        }
        if let Some(dir) = lookup("FEM_GL_MESH_DIR") {
            config.mesh_dir = PathBuf::from(dir);
        }
        if let Some(ttl) = lookup("FEM_GL_MESH_TTL_SECS") {
            let secs: u64 = ttl
                .parse()
                .map_err(|e| format!("FEM_GL_MESH_TTL_SECS 无效 '{}': {}", ttl, e))?;
            config.mesh_ttl = Duration::from_secs(secs);
        }
        if let Some(rule) = lookup("FEM_GL_BOUNDARY_RULE") {
            config.boundary_rule = rule.parse()?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("监听地址不能为空".to_string());
        }
        if self.mesh_ttl.is_zero() {
            return Err("网格缓存 TTL 必须大于 0".to_string());
        }
        Ok(())
    }

    /// 后台清理的间隔：TTL 的六分之一，最少 10 秒
    pub fn cleanup_interval(&self) -> Duration {
        (self.mesh_ttl / 6).max(Duration::from_secs(10))
    }
}
