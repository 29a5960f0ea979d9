pub mod health;
pub mod mesh;
pub mod objects;
pub mod timestep;

pub use health::hello;
pub use mesh::{export_mesh, mesher_init};
pub use objects::{
    get_object_properties, get_object_timesteps, get_timestep_after, get_timestep_before,
    list_objects,
};
pub use timestep::{get_timestep_data, get_timestep_series};

use std::io::ErrorKind;

use actix_web::HttpResponse;
use actix_web::error::BlockingError;

use crate::error::PipelineError;

/// 将管线错误转换为 HTTP 错误响应
pub(crate) fn error_response(err: &PipelineError) -> HttpResponse {
    let (mut builder, title) = match err {
        PipelineError::NotFound { .. } => (HttpResponse::NotFound(), "文件不存在或无法访问"),
        PipelineError::Io { source, .. } => match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                (HttpResponse::NotFound(), "文件不存在或无法访问")
            }
            _ => (HttpResponse::UnprocessableEntity(), "文件内容损坏，无法读取"),
        },
        PipelineError::InvalidName { .. } => (HttpResponse::BadRequest(), "非法的名称或路径"),
        PipelineError::InvalidRange { .. } => (HttpResponse::BadRequest(), "非法的颜色范围"),
        PipelineError::UnsupportedSource { .. } => (HttpResponse::BadRequest(), "不支持的文件格式"),
        PipelineError::Decode { .. } => (HttpResponse::UnprocessableEntity(), "二进制数据解码失败"),
        PipelineError::ShapeMismatch { .. } => {
            (HttpResponse::UnprocessableEntity(), "时间步数据与网格不匹配")
        }
        PipelineError::IndexOutOfRange { .. } => {
            (HttpResponse::UnprocessableEntity(), "单元引用了不存在的节点")
        }
    };
    builder.json(serde_json::json!({
        "error": title,
        "details": err.to_string(),
    }))
}

/// 后台线程池执行失败（通常是任务 panic）
pub(crate) fn blocking_failed(err: BlockingError) -> HttpResponse {
    log::error!("后台任务执行失败: {}", err);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "后台任务执行失败",
        "details": err.to_string(),
    }))
}

pub(crate) fn unknown_mesh(mesh_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "无效的 mesh_id，网格可能已过期，请重新初始化",
        "mesh_id": mesh_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use std::io;

    fn io_error(kind: ErrorKind) -> PipelineError {
        PipelineError::io("fo/0.1/no/nt11.bin.gz", io::Error::new(kind, "test"))
    }

    #[test]
    fn test_io_status_follows_error_kind() {
        assert_eq!(
            error_response(&io_error(ErrorKind::NotFound)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(&io_error(ErrorKind::PermissionDenied)).status(),
            StatusCode::NOT_FOUND
        );
        // 损坏的 gzip 流
        assert_eq!(
            error_response(&io_error(ErrorKind::InvalidInput)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_response(&io_error(ErrorKind::UnexpectedEof)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_invalid_range_is_bad_request() {
        let err = PipelineError::InvalidRange { min: 1.0, max: 0.0 };
        assert_eq!(error_response(&err).status(), StatusCode::BAD_REQUEST);
    }
}
