//! 表面网格管线
//!
//! 一次运行依次执行：解码 → 占用计数 → 边界面提取 → 三角化 → 索引压缩。
//! 得到的 [`SurfaceMesh`] 构建后不再修改，可以放进缓存供多个时间步请求共享；
//! 着色与标量查询只读访问它。任何阶段失败都不会产生部分结果。

use std::time::Instant;

use serde::Serialize;

use crate::catalog::DatasetCatalog;
use crate::color::ColorMap;
use crate::decode::{load_elements, load_nodes, load_scalar_field};
use crate::error::Result;
use crate::mesh::field::check_field;
use crate::mesh::{
    BoundaryRule, CompactGeometry, Element, Node, TimestepSeries, classify, compact,
    extract_with_rule, triangulate,
};
use crate::utils::parser_registry::SourceRegistry;

/// 各阶段的数量统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeshStats {
    pub nodes: usize,
    pub elements: usize,
    pub boundary_faces: usize,
    pub triangles: usize,
    pub surface_vertices: usize,
}

#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    nodes: Vec<Node>,
    element_count: usize,
    rule: BoundaryRule,
    boundary_faces: usize,
    geometry: CompactGeometry,
}

impl SurfaceMesh {
    /// 从已解码的节点和单元构建表面网格
    pub fn build(nodes: Vec<Node>, elements: Vec<Element>, rule: BoundaryRule) -> Result<Self> {
        let start = Instant::now();

        let occurrence = classify(&elements, nodes.len())?;
        let faces = extract_with_rule(rule, &elements, &occurrence)?;
        let triangles = triangulate(&faces);
        let geometry = compact(&triangles, &nodes)?;

        if geometry.is_empty() {
            log::warn!(
                "未找到边界面 (规则 {}, {} 个单元)，返回空几何体",
                rule,
                elements.len()
            );
        }
        log::debug!(
            "表面提取完成: {} 节点, {} 单元 → {} 面, {} 三角形, {} 顶点, 耗时 {}ms",
            nodes.len(),
            elements.len(),
            faces.len(),
            triangles.len(),
            geometry.vertex_count(),
            start.elapsed().as_millis()
        );

        Ok(Self {
            nodes,
            element_count: elements.len(),
            rule,
            boundary_faces: faces.len(),
            geometry,
        })
    }

    /// 读取网格文件并构建，路径相对于数据根目录
    pub fn load(
        registry: &SourceRegistry,
        catalog: &DatasetCatalog,
        node_path: &str,
        element_path: &str,
        rule: BoundaryRule,
    ) -> Result<Self> {
        let nodes = load_nodes(registry, &catalog.mesh_path(node_path)?)?;
        let elements = load_elements(registry, &catalog.mesh_path(element_path)?)?;
        log::info!(
            "已解析 {} 个节点, {} 个单元 ({}, {})",
            nodes.len(),
            elements.len(),
            node_path,
            element_path
        );
        Self::build(nodes, elements, rule)
    }

    pub fn geometry(&self) -> &CompactGeometry {
        &self.geometry
    }

    pub fn rule(&self) -> BoundaryRule {
        self.rule
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            nodes: self.nodes.len(),
            elements: self.element_count,
            boundary_faces: self.boundary_faces,
            triangles: self.geometry.triangle_count(),
            surface_vertices: self.geometry.vertex_count(),
        }
    }

    /// 表面顶点的包围盒 (min, max)，空几何体返回 None
    pub fn bounds(&self) -> Option<(Node, Node)> {
        let mut vertices = self.geometry.vertices.iter();
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(mut lo, mut hi), v| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(v[axis]);
                hi[axis] = hi[axis].max(v[axis]);
            }
            (lo, hi)
        }))
    }

    /// 包围盒中心，客户端用它把模型移到原点
    pub fn center(&self) -> Node {
        match self.bounds() {
            Some((lo, hi)) => [0, 1, 2].map(|axis| (lo[axis] + hi[axis]) / 2.0),
            None => [0.0; 3],
        }
    }

    /// 每个表面顶点对应的标量值
    pub fn vertex_scalars(&self, field: &[f64]) -> Result<Vec<f64>> {
        check_field(field, self.nodes.len())?;
        Ok(self
            .geometry
            .source_ids
            .iter()
            .map(|&id| field[id])
            .collect())
    }

    /// 每个表面顶点的颜色，与 `geometry().vertices` 一一对应
    pub fn colorize(&self, field: &[f64], color_map: &ColorMap) -> Result<Vec<[u8; 3]>> {
        check_field(field, self.nodes.len())?;
        color_map.map(&self.geometry.source_ids, field)
    }

    /// 加载某个对象某个场在所有时间步的数据
    pub fn load_timestep_series(
        &self,
        registry: &SourceRegistry,
        catalog: &DatasetCatalog,
        object: &str,
        field: &str,
    ) -> Result<TimestepSeries> {
        let mut series = TimestepSeries::new(self.nodes.len());
        for timestep in catalog.sorted_timesteps(object)? {
            let path = catalog.field_path(object, &timestep, field)?;
            series.push(timestep, load_scalar_field(registry, &path)?)?;
        }
        Ok(series)
    }
}
