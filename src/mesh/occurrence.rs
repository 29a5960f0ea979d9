use crate::error::Result;
use crate::mesh::{Element, node_index};

/// 节点被多少个单元引用
///
/// 规则六面体网格中只会出现 1（角点）、2（棱）、4（表面）、8（内部）四种计数，
/// 这是网格结构的假设而不是普遍保证。计数为 0 表示该节点未被任何单元引用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceTable {
    counts: Vec<u32>,
}

impl OccurrenceTable {
    /// 节点的引用次数，越界编号返回 0
    pub fn count(&self, node: usize) -> u32 {
        self.counts.get(node).copied().unwrap_or(0)
    }

    /// 表覆盖的节点总数（与解码的节点数一致）
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 所有计数之和，恒等于 8 × 单元数
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// 被至少一个单元引用的节点及其计数，按节点编号升序
    pub fn referenced(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(id, c)| (id, *c))
    }
}

/// 统计每个节点在所有单元中出现的次数
pub fn classify(elements: &[Element], node_count: usize) -> Result<OccurrenceTable> {
    let mut counts = vec![0u32; node_count];
    for (element_index, element) in elements.iter().enumerate() {
        for &id in element {
            let node = node_index("classify", element_index, id, node_count)?;
            counts[node] += 1;
        }
    }
    Ok(OccurrenceTable { counts })
}
