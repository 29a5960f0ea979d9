use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mesh::{Element, OccurrenceTable, node_index};

/// 单元的局部面表，顺序固定，绕向决定外法线方向
pub const FACE_TABLE: [[usize; 4]; 6] = [
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
    [4, 5, 6, 7],
    [3, 2, 1, 0],
];

/// 边界面的占用权重：角点面 9、棱边面 12、平面面 16
///
/// 这些阈值只对每个方向至少两层单元的规则网格成立，不是通用的边界判定。
pub const BOUNDARY_WEIGHTS: [u32; 3] = [9, 12, 16];

/// 四边形面，存储全局节点下标
pub type Face = [usize; 4];

/// 三角形，存储全局节点下标
pub type Triangle = [usize; 3];

/// 边界面在规则网格中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryClass {
    Corner,
    Edge,
    Flat,
}

pub fn boundary_class(weight: u32) -> Option<BoundaryClass> {
    match weight {
        9 => Some(BoundaryClass::Corner),
        12 => Some(BoundaryClass::Edge),
        16 => Some(BoundaryClass::Flat),
        _ => None,
    }
}

/// 面上四个节点的占用计数之和
pub fn face_weight(face: &Face, table: &OccurrenceTable) -> u32 {
    face.iter().map(|&node| table.count(node)).sum()
}

/// 单元的六个面（全局下标），越界编号报错
fn element_faces(
    stage: &'static str,
    element_index: usize,
    element: &Element,
    node_count: usize,
) -> Result<[Face; 6]> {
    let mut corners = [0usize; 8];
    for (corner, &id) in corners.iter_mut().zip(element) {
        *corner = node_index(stage, element_index, id, node_count)?;
    }
    Ok(FACE_TABLE.map(|local| local.map(|c| corners[c])))
}

/// 按占用权重提取边界面，保持 单元 → 局部面 的顺序
pub fn extract(elements: &[Element], table: &OccurrenceTable) -> Result<Vec<Face>> {
    let mut faces = Vec::new();
    for (element_index, element) in elements.iter().enumerate() {
        for face in element_faces("extract", element_index, element, table.len())? {
            if boundary_class(face_weight(&face, table)).is_some() {
                faces.push(face);
            }
        }
    }
    Ok(faces)
}

/// 按共享关系提取边界面：节点集合只出现一次的面即为边界面
///
/// 适用于某个方向只有一层单元的薄网格，此时占用权重无法区分边界。
pub fn extract_shared(elements: &[Element], node_count: usize) -> Result<Vec<Face>> {
    let mut candidates = Vec::with_capacity(elements.len() * 6);
    let mut usage: HashMap<Face, u32> = HashMap::with_capacity(elements.len() * 6);
    for (element_index, element) in elements.iter().enumerate() {
        for face in element_faces("extract", element_index, element, node_count)? {
            let mut key = face;
            key.sort_unstable();
            *usage.entry(key).or_insert(0) += 1;
            candidates.push((face, key));
        }
    }

    Ok(candidates
        .into_iter()
        .filter(|(_, key)| usage.get(key) == Some(&1))
        .map(|(face, _)| face)
        .collect())
}

/// 边界面判定规则
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// 占用权重 ∈ {9, 12, 16}
    #[default]
    OccurrenceWeight,
    /// 不与其他单元共享的面
    SharedFace,
}

impl fmt::Display for BoundaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryRule::OccurrenceWeight => f.write_str("occurrence_weight"),
            BoundaryRule::SharedFace => f.write_str("shared_face"),
        }
    }
}

impl FromStr for BoundaryRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "occurrence_weight" | "weight" => Ok(BoundaryRule::OccurrenceWeight),
            "shared_face" | "shared" => Ok(BoundaryRule::SharedFace),
            other => Err(format!("未知的边界规则: {}", other)),
        }
    }
}

pub fn extract_with_rule(
    rule: BoundaryRule,
    elements: &[Element],
    table: &OccurrenceTable,
) -> Result<Vec<Face>> {
    match rule {
        BoundaryRule::OccurrenceWeight => extract(elements, table),
        BoundaryRule::SharedFace => extract_shared(elements, table.len()),
    }
}

/// 每个四边形 (a, b, c, d) 拆成 (a, b, c) 和 (a, c, d)，保持原有绕向
pub fn triangulate(faces: &[Face]) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(faces.len() * 2);
    for &[a, b, c, d] in faces {
        triangles.push([a, b, c]);
        triangles.push([a, c, d]);
    }
    triangles
}
