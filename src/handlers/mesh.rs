use actix_web::{HttpResponse, Responder, get, http::header::ContentType, post, web};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::export::{indices_to_string, vertices_to_string};
use crate::handlers::{blocking_failed, error_response, unknown_mesh};
use crate::mesh::BoundaryRule;
use crate::pipeline::{MeshStats, SurfaceMesh};

#[derive(Deserialize)]
pub struct MesherInitRequest {
    /// 节点文件，相对数据根目录，例如 "welding_sim/case.nodes.bin"
    pub nodepath: String,
    /// 单元文件，相对数据根目录
    pub elementpath: String,
    /// 边界面判定规则，不指定时使用服务默认值
    pub rule: Option<BoundaryRule>,
}

#[derive(Serialize)]
pub struct MesherInitResponse {
    pub mesh_id: String,
    /// 压缩后的顶点坐标，按 x, y, z 平铺
    pub surface_nodes: Vec<f64>,
    /// 三角形索引
    pub surface_indexfile: Vec<u32>,
    /// 模型中心，客户端用来居中显示
    pub surface_metadata: [f64; 3],
    pub rule: BoundaryRule,
    pub stats: MeshStats,
}

/// 解码网格文件并提取表面，结果放入缓存供后续时间步请求使用
///
/// 解码和提取在阻塞线程池中执行；任何阶段失败都不会写入缓存。
#[post("/mesher_init")]
pub async fn mesher_init(
    data: web::Data<AppState>,
    payload: web::Json<MesherInitRequest>,
) -> impl Responder {
    let MesherInitRequest {
        nodepath,
        elementpath,
        rule,
    } = payload.into_inner();
    let rule = rule.unwrap_or(data.default_rule);
    let registry = data.source_registry.clone();
    let catalog = data.catalog.clone();

    let built = web::block(move || {
        SurfaceMesh::load(&registry, &catalog, &nodepath, &elementpath, rule)
    })
    .await;

    let mesh = match built {
        Ok(Ok(mesh)) => mesh,
        Ok(Err(err)) => {
            log::warn!("网格初始化失败: {}", err);
            return error_response(&err);
        }
        Err(err) => return blocking_failed(err),
    };

    let geometry = mesh.geometry();
    let surface_nodes = geometry.vertices.iter().flatten().copied().collect();
    let surface_indexfile = geometry.indices.clone();
    let surface_metadata = mesh.center();
    let stats = mesh.stats();
    let rule = mesh.rule();
    let mesh_id = data.mesh_store.insert(mesh);
    log::info!(
        "网格 {} 已缓存: {} 个表面顶点, {} 个三角形",
        mesh_id,
        stats.surface_vertices,
        stats.triangles
    );

    HttpResponse::Ok().json(MesherInitResponse {
        mesh_id,
        surface_nodes,
        surface_indexfile,
        surface_metadata,
        rule,
        stats,
    })
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ExportPart {
    Vertices,
    Indices,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub mesh_id: String,
    pub part: ExportPart,
}

/// 以逗号分隔文本导出已缓存网格的顶点或索引
/// 例如: /mesh/export?mesh_id=xxx&part=vertices
#[get("/mesh/export")]
pub async fn export_mesh(
    data: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    let Some(mesh) = data.mesh_store.get(&query.mesh_id) else {
        return unknown_mesh(&query.mesh_id);
    };

    let body = match query.part {
        ExportPart::Vertices => vertices_to_string(&mesh.geometry().vertices),
        ExportPart::Indices => indices_to_string(&mesh.geometry().indices),
    };

    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .append_header(("X-Mesh-Id", query.mesh_id.clone()))
        .body(body)
}
