use crate::error::{PipelineError, Result};
use crate::mesh::{Node, Triangle};

const UNASSIGNED: u32 = u32::MAX;

/// 压缩后的索引几何体
///
/// `vertices[i]` 是原始节点 `source_ids[i]` 的坐标，`source_ids` 严格升序；
/// `indices` 每三个一组构成三角形，所有下标都小于 `vertices.len()`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompactGeometry {
    pub vertices: Vec<Node>,
    pub indices: Vec<u32>,
    pub source_ids: Vec<usize>,
}

impl CompactGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// 以压缩下标表示的三角形
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

/// 去重并重新编号三角形引用的节点
///
/// 新编号按原始编号升序分配，与首次出现的顺序无关。
pub fn compact(triangles: &[Triangle], nodes: &[Node]) -> Result<CompactGeometry> {
    let mut source_ids: Vec<usize> = Vec::with_capacity(triangles.len() * 3);
    for (triangle_index, triangle) in triangles.iter().enumerate() {
        for &id in triangle {
            if id >= nodes.len() {
                return Err(PipelineError::IndexOutOfRange {
                    stage: "compact",
                    element: triangle_index,
                    node: id as i64,
                    node_count: nodes.len(),
                });
            }
            source_ids.push(id);
        }
    }
    source_ids.sort_unstable();
    source_ids.dedup();

    let mut remap = vec![UNASSIGNED; nodes.len()];
    for (new_id, &old_id) in source_ids.iter().enumerate() {
        remap[old_id] = new_id as u32;
    }

    let indices = triangles.iter().flatten().map(|&id| remap[id]).collect();
    let vertices = source_ids.iter().map(|&id| nodes[id]).collect();

    Ok(CompactGeometry {
        vertices,
        indices,
        source_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(n: usize) -> Vec<Node> {
        (0..n).map(|i| [i as f64, 0.0, -(i as f64)]).collect()
    }

    #[test]
    fn test_ascending_original_order() {
        // 首次出现的顺序是 7, 3, 5，但新编号按原始编号升序
        let triangles = vec![[7, 3, 5], [5, 3, 9]];
        let geometry = compact(&triangles, &nodes(10)).unwrap();

        assert_eq!(geometry.source_ids, vec![3, 5, 7, 9]);
        assert_eq!(geometry.indices, vec![2, 0, 1, 1, 0, 3]);
        assert_eq!(geometry.vertices[0], [3.0, 0.0, -3.0]);
        assert_eq!(geometry.vertices[3], [9.0, 0.0, -9.0]);
    }

    #[test]
    fn test_bijection_and_bounds() {
        let triangles = vec![[0, 4, 8], [8, 4, 12], [12, 16, 0]];
        let geometry = compact(&triangles, &nodes(20)).unwrap();

        assert_eq!(geometry.vertex_count(), 5);
        assert_eq!(geometry.triangle_count(), 3);
        assert!(geometry.indices.iter().all(|&i| (i as usize) < geometry.vertex_count()));
        for (original, compacted) in triangles.iter().zip(geometry.triangles()) {
            for (a, b) in original.iter().zip(compacted) {
                assert_eq!(geometry.source_ids[b], *a);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let triangles = vec![[11, 2, 6], [6, 2, 19]];
        let first = compact(&triangles, &nodes(20)).unwrap();
        let again: Vec<Triangle> = first.triangles().collect();
        let second = compact(&again, &first.vertices).unwrap();

        assert_eq!(second.vertices, first.vertices);
        assert_eq!(second.indices, first.indices);
        assert_eq!(second.source_ids, (0..first.vertex_count()).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty() {
        let geometry = compact(&[], &nodes(4)).unwrap();
        assert!(geometry.is_empty());
        assert_eq!(geometry.vertex_count(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let err = compact(&[[0, 1, 4]], &nodes(4)).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::IndexOutOfRange { stage: "compact", node: 4, .. }
        ));
    }
}
