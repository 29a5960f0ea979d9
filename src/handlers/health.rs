use actix_web::{HttpResponse, Responder, get, web};

use crate::app_state::AppState;

/// 根路径健康检查/服务说明
#[get("/")]
pub async fn hello(data: web::Data<AppState>) -> impl Responder {
    let supported = data.source_registry.supported_extensions();
    HttpResponse::Ok().json(serde_json::json!({
        "message": "FEM 表面网格数据服务",
        "endpoints": [
            "GET /objects",
            "POST /objects/properties",
            "POST /objects/timesteps",
            "POST /objects/timesteps/before",
            "POST /objects/timesteps/after",
            "POST /mesher_init",
            "POST /timestep_data",
            "POST /timestep_series",
            "GET /mesh/export?mesh_id=<id>&part=<vertices|indices>",
        ],
        "supported_extensions": supported,
        "mesh_dir": data.catalog.root().display().to_string(),
        "cached_meshes": data.mesh_store.len(),
    }))
}
