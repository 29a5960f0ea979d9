use std::fmt;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{PipelineError, Result};
use crate::mesh::{Element, Node, ScalarField};
use crate::utils::parser_registry::SourceRegistry;

/// 二进制输入的种类，每种都自带标量宽度与分组大小
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeKind {
    /// 节点坐标：每个节点 3 个 f64 (x, y, z)
    Nodes,
    /// 六面体单元：每个单元 8 个 i32 节点编号
    Elements,
    /// 时间步标量场：每个节点 1 个 f64
    ScalarField,
}

impl DecodeKind {
    /// 单个标量的字节数
    pub fn scalar_width(self) -> usize {
        match self {
            DecodeKind::Nodes | DecodeKind::ScalarField => 8,
            DecodeKind::Elements => 4,
        }
    }

    /// 每个条目包含的标量个数
    pub fn components(self) -> usize {
        match self {
            DecodeKind::Nodes => 3,
            DecodeKind::Elements => 8,
            DecodeKind::ScalarField => 1,
        }
    }

    /// 每个条目的字节数
    pub fn stride(self) -> usize {
        self.scalar_width() * self.components()
    }
}

impl fmt::Display for DecodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeKind::Nodes => "nodes",
            DecodeKind::Elements => "elements",
            DecodeKind::ScalarField => "scalar field",
        };
        f.write_str(name)
    }
}

/// 解码结果
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedArray {
    Nodes(Vec<Node>),
    Elements(Vec<Element>),
    ScalarField(ScalarField),
}

impl DecodedArray {
    /// 条目数量（节点数、单元数或标量个数）
    pub fn len(&self) -> usize {
        match self {
            DecodedArray::Nodes(v) => v.len(),
            DecodedArray::Elements(v) => v.len(),
            DecodedArray::ScalarField(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 校验字节长度：先按标量宽度，再按整条目步长
fn check_length(bytes: &[u8], kind: DecodeKind) -> Result<usize> {
    for stride in [kind.scalar_width(), kind.stride()] {
        if bytes.len() % stride != 0 {
            return Err(PipelineError::Decode {
                kind,
                stride,
                actual: bytes.len(),
            });
        }
    }
    Ok(bytes.len() / kind.stride())
}

/// 按小端序解码原始字节
pub fn decode(bytes: &[u8], kind: DecodeKind) -> Result<DecodedArray> {
    let items = check_length(bytes, kind)?;
    let decoded = match kind {
        DecodeKind::Nodes => {
            let mut flat = vec![0f64; items * 3];
            LittleEndian::read_f64_into(bytes, &mut flat);
            DecodedArray::Nodes(
                flat.chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect(),
            )
        }
        DecodeKind::Elements => {
            let mut flat = vec![0i32; items * 8];
            LittleEndian::read_i32_into(bytes, &mut flat);
            DecodedArray::Elements(
                flat.chunks_exact(8)
                    .map(|c| {
                        let mut element = [0i32; 8];
                        element.copy_from_slice(c);
                        element
                    })
                    .collect(),
            )
        }
        DecodeKind::ScalarField => {
            let mut values = vec![0f64; items];
            LittleEndian::read_f64_into(bytes, &mut values);
            DecodedArray::ScalarField(values)
        }
    };
    log::debug!("解码 {} 完成: {} 条", kind, decoded.len());
    Ok(decoded)
}

pub fn decode_nodes(bytes: &[u8]) -> Result<Vec<Node>> {
    match decode(bytes, DecodeKind::Nodes)? {
        DecodedArray::Nodes(nodes) => Ok(nodes),
        _ => unreachable!("DecodeKind::Nodes 总是产生节点数组"),
    }
}

pub fn decode_elements(bytes: &[u8]) -> Result<Vec<Element>> {
    match decode(bytes, DecodeKind::Elements)? {
        DecodedArray::Elements(elements) => Ok(elements),
        _ => unreachable!("DecodeKind::Elements 总是产生单元数组"),
    }
}

pub fn decode_scalar_field(bytes: &[u8]) -> Result<ScalarField> {
    match decode(bytes, DecodeKind::ScalarField)? {
        DecodedArray::ScalarField(values) => Ok(values),
        _ => unreachable!("DecodeKind::ScalarField 总是产生标量数组"),
    }
}

/// 通过源注册表读取文件（自动识别 .gz）后解码节点
pub fn load_nodes(registry: &SourceRegistry, path: &Path) -> Result<Vec<Node>> {
    decode_nodes(&registry.read(path)?)
}

pub fn load_elements(registry: &SourceRegistry, path: &Path) -> Result<Vec<Element>> {
    decode_elements(&registry.read(path)?)
}

pub fn load_scalar_field(registry: &SourceRegistry, path: &Path) -> Result<ScalarField> {
    decode_scalar_field(&registry.read(path)?)
}
