//! 六面体网格的表面提取
//!
//! 流程：占用计数 → 边界面筛选 → 四边形三角化 → 索引压缩。
//! 每个阶段只消费上一阶段的输出，不修改任何已有数据。

pub mod compact;
pub mod field;
pub mod grid;
pub mod occurrence;
pub mod surface;

pub use compact::{CompactGeometry, compact};
pub use field::{ScalarField, Timestep, TimestepSeries};
pub use grid::structured_hex_grid;
pub use occurrence::{OccurrenceTable, classify};
pub use surface::{
    BOUNDARY_WEIGHTS, BoundaryClass, BoundaryRule, FACE_TABLE, Face, Triangle, boundary_class,
    extract, extract_shared, extract_with_rule, face_weight, triangulate,
};

use crate::error::{PipelineError, Result};

/// 节点坐标 (x, y, z)，节点编号即数组下标
pub type Node = [f64; 3];

/// 八节点六面体单元，存储解码得到的原始节点编号
pub type Element = [i32; 8];

/// 将单元中的原始编号转换为数组下标，负数或越界都视为损坏输入
pub(crate) fn node_index(
    stage: &'static str,
    element: usize,
    id: i32,
    node_count: usize,
) -> Result<usize> {
    match usize::try_from(id) {
        Ok(index) if index < node_count => Ok(index),
        _ => Err(PipelineError::IndexOutOfRange {
            stage,
            element,
            node: i64::from(id),
            node_count,
        }),
    }
}
