use actix_web::{App, HttpServer, middleware, web};

use fem_gl_backend::app_state::AppState;
use fem_gl_backend::config::ServerConfig;
use fem_gl_backend::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let app_state = web::Data::new(AppState::from_config(&config));
    log::info!(
        "已注册的读取器扩展名: {:?}",
        app_state.source_registry.supported_extensions()
    );

    // 启动后台清理任务：定期清理过期的网格缓存，避免长期占用内存
    let cleanup_store = app_state.mesh_store.clone();
    let cleanup_interval = config.cleanup_interval();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let cleaned_count = cleanup_store.cleanup_expired();
            if cleaned_count > 0 {
                log::info!(
                    "[清理任务] 清理了 {} 个过期网格，当前剩余: {} 个",
                    cleaned_count,
                    cleanup_store.len()
                );
            }
        }
    });

    log::info!("服务器启动在 http://{}:{}", config.host, config.port);
    log::info!("网格数据目录: {}", config.mesh_dir.display());
    log::info!(
        "网格缓存 TTL: {} 秒, 清理间隔: {} 秒",
        app_state.mesh_store.default_ttl().as_secs(),
        cleanup_interval.as_secs()
    );
    log::info!("默认边界规则: {}", config.boundary_rule);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
