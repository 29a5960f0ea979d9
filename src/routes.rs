use actix_web::web;

use crate::handlers;

/// 统一注册 HTTP 路由，方便集中管理
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::hello)
        .service(handlers::list_objects)
        .service(handlers::get_object_properties)
        .service(handlers::get_object_timesteps)
        .service(handlers::get_timestep_before)
        .service(handlers::get_timestep_after)
        .service(handlers::mesher_init)
        .service(handlers::get_timestep_data)
        .service(handlers::get_timestep_series)
        .service(handlers::export_mesh);
}
