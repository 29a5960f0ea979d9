//! FEM 仿真结果的表面网格服务
//!
//! 读取二进制节点、六面体单元与时间步标量文件，提取网格外表面并生成
//! 带索引的三角形几何体与逐顶点颜色，供浏览器端显示。

pub mod app_state;
pub mod catalog;
pub mod color;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod handlers;
pub mod mesh;
pub mod parsers;
pub mod pipeline;
pub mod routes;
pub mod store;
pub mod utils;

pub use error::{PipelineError, Result};
pub use pipeline::{MeshStats, SurfaceMesh};
