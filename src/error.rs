//! 网格管线错误类型
//!
//! 解码、分类、提取、压缩、着色各阶段的错误都汇总到 [`PipelineError`]，
//! 并携带阶段名与期望/实际尺寸，方便调用方定位问题。

use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeKind;

/// 管线结果类型
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// 字节长度不能被元素步长整除
    #[error("{kind} 解码失败: 字节数 {actual} 不是步长 {stride} 的整数倍")]
    Decode {
        kind: DecodeKind,
        stride: usize,
        actual: usize,
    },

    /// 源文件不存在或无法读取
    #[error("无法读取 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 标量场长度与节点数不一致
    #[error("标量场长度不匹配: 需要 {expected} 个节点值，但提供了 {actual} 个")]
    ShapeMismatch { expected: usize, actual: usize },

    /// 单元引用了不存在的节点
    #[error("[{stage}] 单元 {element} 引用了节点 {node}，但节点总数只有 {node_count}")]
    IndexOutOfRange {
        stage: &'static str,
        element: usize,
        node: i64,
        node_count: usize,
    },

    /// 数据目录中找不到请求的对象、时间步或字段
    #[error("找不到{what}: {name}")]
    NotFound { what: &'static str, name: String },

    /// 名称中包含路径分隔符等非法字符
    #[error("非法名称: {name}")]
    InvalidName { name: String },

    /// 颜色范围的下界大于上界或不是有限值
    #[error("非法的颜色范围: [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    /// 不支持的源文件扩展名
    #[error("不支持的文件格式: {path}")]
    UnsupportedSource { path: PathBuf },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }
}
