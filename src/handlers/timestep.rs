use actix_web::{HttpResponse, Responder, post, web};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::color::{ColorMap, Palette, ScalarRange};
use crate::decode::load_scalar_field;
use crate::error::Result;
use crate::handlers::{blocking_failed, error_response, unknown_mesh};

#[derive(Deserialize)]
pub struct TimestepDataRequest {
    pub mesh_id: String,
    pub object_name: String,
    /// 场名称，例如 "nt11"
    pub field: String,
    pub timestep: String,
    #[serde(default)]
    pub palette: Palette,
    /// 固定的颜色范围；不指定时使用该时间步表面值的范围
    pub range: Option<ScalarRange>,
}

#[derive(Serialize)]
pub struct TimestepDataResponse {
    /// 每个表面顶点的标量值
    pub timestep_data: Vec<f64>,
    /// 每个表面顶点的颜色，按 r, g, b 平铺
    pub colors: Vec<u8>,
    pub range: ScalarRange,
}

/// 读取一个时间步并为缓存中的网格着色
#[post("/timestep_data")]
pub async fn get_timestep_data(
    data: web::Data<AppState>,
    payload: web::Json<TimestepDataRequest>,
) -> impl Responder {
    if let Some(range) = payload.range {
        if let Err(err) = range.validate() {
            return error_response(&err);
        }
    }
    let Some(mesh) = data.mesh_store.get(&payload.mesh_id) else {
        return unknown_mesh(&payload.mesh_id);
    };
    let path = match data
        .catalog
        .field_path(&payload.object_name, &payload.timestep, &payload.field)
    {
        Ok(path) => path,
        Err(err) => return error_response(&err),
    };

    let registry = data.source_registry.clone();
    let palette = payload.palette;
    let fixed_range = payload.range;

    let result = web::block(move || -> Result<TimestepDataResponse> {
        let field = load_scalar_field(&registry, &path)?;
        let timestep_data = mesh.vertex_scalars(&field)?;
        let range = fixed_range.unwrap_or_else(|| ScalarRange::of(timestep_data.iter().copied()));
        let colors = mesh.colorize(&field, &ColorMap::new(palette, range))?;
        Ok(TimestepDataResponse {
            timestep_data,
            colors: colors.into_iter().flatten().collect(),
            range,
        })
    })
    .await;

    match result {
        Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
        Ok(Err(err)) => error_response(&err),
        Err(err) => blocking_failed(err),
    }
}

#[derive(Deserialize)]
pub struct TimestepSeriesRequest {
    pub mesh_id: String,
    pub object_name: String,
    pub field: String,
    #[serde(default)]
    pub palette: Palette,
}

#[derive(Serialize)]
pub struct TimestepSeriesResponse {
    pub timesteps: Vec<String>,
    /// 所有时间步共用的颜色范围
    pub range: ScalarRange,
    /// 每个时间步一组颜色，按 r, g, b 平铺
    pub colors: Vec<Vec<u8>>,
}

/// 一次性为所有时间步着色，颜色刻度在整个序列上保持一致
#[post("/timestep_series")]
pub async fn get_timestep_series(
    data: web::Data<AppState>,
    payload: web::Json<TimestepSeriesRequest>,
) -> impl Responder {
    let Some(mesh) = data.mesh_store.get(&payload.mesh_id) else {
        return unknown_mesh(&payload.mesh_id);
    };

    let registry = data.source_registry.clone();
    let catalog = data.catalog.clone();
    let TimestepSeriesRequest {
        object_name,
        field,
        palette,
        ..
    } = payload.into_inner();

    let result = web::block(move || -> Result<TimestepSeriesResponse> {
        let series = mesh.load_timestep_series(&registry, &catalog, &object_name, &field)?;
        let range = series.global_range();
        let color_map = ColorMap::new(palette, range);
        let mut colors = Vec::with_capacity(series.len());
        for step in series.iter() {
            let step_colors = mesh.colorize(&step.values, &color_map)?;
            colors.push(step_colors.into_iter().flatten().collect());
        }
        Ok(TimestepSeriesResponse {
            timesteps: series.labels().map(str::to_string).collect(),
            range,
            colors,
        })
    })
    .await;

    match result {
        Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
        Ok(Err(err)) => error_response(&err),
        Err(err) => blocking_failed(err),
    }
}
