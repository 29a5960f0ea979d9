use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::handlers::error_response;

#[derive(Deserialize)]
pub struct ObjectRequest {
    /// 数据目录下的对象名，例如 "welding_sim"
    pub object_name: String,
}

#[derive(Deserialize)]
pub struct TimestepNeighbourRequest {
    pub object_name: String,
    pub current_timestep: String,
}

/// 列出所有带 fo 目录的仿真对象
#[get("/objects")]
pub async fn list_objects(data: web::Data<AppState>) -> impl Responder {
    match data.catalog.list_objects() {
        Ok(objects) => HttpResponse::Ok().json(serde_json::json!({ "data_folders": objects })),
        Err(err) => error_response(&err),
    }
}

/// 对象可显示的属性列表及初始时间步
#[post("/objects/properties")]
pub async fn get_object_properties(
    data: web::Data<AppState>,
    payload: web::Json<ObjectRequest>,
) -> impl Responder {
    match data.catalog.object_properties(&payload.object_name) {
        Ok(props) => HttpResponse::Ok().json(props),
        Err(err) => error_response(&err),
    }
}

/// 按数值排序的时间步列表
#[post("/objects/timesteps")]
pub async fn get_object_timesteps(
    data: web::Data<AppState>,
    payload: web::Json<ObjectRequest>,
) -> impl Responder {
    match data.catalog.sorted_timesteps(&payload.object_name) {
        Ok(timesteps) => {
            HttpResponse::Ok().json(serde_json::json!({ "object_timesteps": timesteps }))
        }
        Err(err) => error_response(&err),
    }
}

/// 上一个时间步（已是第一个时返回自身）
#[post("/objects/timesteps/before")]
pub async fn get_timestep_before(
    data: web::Data<AppState>,
    payload: web::Json<TimestepNeighbourRequest>,
) -> impl Responder {
    match data
        .catalog
        .timestep_before(&payload.object_name, &payload.current_timestep)
    {
        Ok(previous) => {
            HttpResponse::Ok().json(serde_json::json!({ "previous_timestep": previous }))
        }
        Err(err) => error_response(&err),
    }
}

/// 下一个时间步（已是最后一个时返回自身）
#[post("/objects/timesteps/after")]
pub async fn get_timestep_after(
    data: web::Data<AppState>,
    payload: web::Json<TimestepNeighbourRequest>,
) -> impl Responder {
    match data
        .catalog
        .timestep_after(&payload.object_name, &payload.current_timestep)
    {
        Ok(next) => HttpResponse::Ok().json(serde_json::json!({ "next_timestep": next })),
        Err(err) => error_response(&err),
    }
}
