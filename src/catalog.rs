//! 数据目录浏览
//!
//! 目录结构：`<mesh_dir>/<object>/fo/<timestep>/{no,eo}/<field>.bin`。
//! 所有路径都由根目录显式拼接，不依赖进程的当前工作目录。

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{PipelineError, Result};

/// 存放时间步目录的子目录
const OUTPUT_DIR: &str = "fo";
/// 节点输出目录
const NODE_OUTPUT_DIR: &str = "no";
/// 单元输出目录
const ELEMENT_OUTPUT_DIR: &str = "eo";
/// 纯网格显示（不带场数据）
pub const WIREFRAME_PROPERTY: &str = "wireframe";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectProperties {
    /// wireframe 与可加载的节点场
    pub object_properties: Vec<String>,
    /// 单元场（`eo` 目录），当前不能着色
    pub element_properties: Vec<String>,
    pub initial_timestep: Option<String>,
}

/// 单个名称只能是一个普通路径段
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(PipelineError::InvalidName {
            name: name.to_string(),
        }),
    }
}

/// 将相对路径拼接到根目录下，拒绝绝对路径和 `..`
pub fn resolve_relative(root: &Path, relative: &str) -> Result<PathBuf> {
    let path = Path::new(relative);
    let all_normal = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if relative.is_empty() || !all_normal {
        return Err(PipelineError::InvalidName {
            name: relative.to_string(),
        });
    }
    Ok(root.join(path))
}

fn read_dir(path: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(path).map_err(|e| PipelineError::io(path, e))
}

/// 列出目录下所有子目录的名称
fn subdirectories(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in read_dir(path)? {
        let entry = entry.map_err(|e| PipelineError::io(path, e))?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// 去掉 .bin / .bin.gz 后缀，其他文件返回 None
fn field_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(".bin.gz")
        .or_else(|| file_name.strip_suffix(".bin"))
        .filter(|name| !name.is_empty())
}

/// 所有时间步下某类输出目录中出现过的场名称
fn collect_fields(
    output_dir: &Path,
    timesteps: &[String],
    kind: &str,
) -> Result<BTreeSet<String>> {
    let mut fields = BTreeSet::new();
    for timestep in timesteps {
        let field_dir = output_dir.join(timestep).join(kind);
        if !field_dir.is_dir() {
            continue;
        }
        for entry in read_dir(&field_dir)? {
            let entry = entry.map_err(|e| PipelineError::io(&field_dir, e))?;
            if let Some(name) = entry.file_name().to_str().and_then(field_name) {
                fields.insert(name.to_string());
            }
        }
    }
    Ok(fields)
}

#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    root: PathBuf,
}

impl DatasetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 所有包含 `fo` 目录的对象，按名称排序
    pub fn list_objects(&self) -> Result<Vec<String>> {
        let mut objects: Vec<String> = subdirectories(&self.root)?
            .into_iter()
            .filter(|name| self.root.join(name).join(OUTPUT_DIR).is_dir())
            .collect();
        objects.sort();
        Ok(objects)
    }

    fn output_dir(&self, object: &str) -> Result<PathBuf> {
        validate_name(object)?;
        let dir = self.root.join(object).join(OUTPUT_DIR);
        if !dir.is_dir() {
            return Err(PipelineError::not_found("对象", object));
        }
        Ok(dir)
    }

    /// 按数值升序排列的时间步标签，无法解析为数字的目录会被跳过
    pub fn sorted_timesteps(&self, object: &str) -> Result<Vec<String>> {
        let dir = self.output_dir(object)?;
        let mut timesteps: Vec<(f64, String)> = Vec::new();
        for label in subdirectories(&dir)? {
            match label.parse::<f64>() {
                Ok(value) if value.is_finite() => timesteps.push((value, label)),
                _ => log::warn!("跳过无法识别的时间步目录: {}/{}", object, label),
            }
        }
        timesteps.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        Ok(timesteps.into_iter().map(|(_, label)| label).collect())
    }

    /// 对象可显示的属性
    ///
    /// `object_properties` 为 wireframe 加上 `no` 目录中的节点场，都能通过
    /// [`field_path`](Self::field_path) 加载；`eo` 目录中的单元场单独列在
    /// `element_properties` 中，只用于展示。
    pub fn object_properties(&self, object: &str) -> Result<ObjectProperties> {
        let timesteps = self.sorted_timesteps(object)?;
        let dir = self.output_dir(object)?;

        let mut object_properties = vec![WIREFRAME_PROPERTY.to_string()];
        object_properties.extend(collect_fields(&dir, &timesteps, NODE_OUTPUT_DIR)?);
        let element_properties = collect_fields(&dir, &timesteps, ELEMENT_OUTPUT_DIR)?
            .into_iter()
            .collect();
        Ok(ObjectProperties {
            object_properties,
            element_properties,
            initial_timestep: timesteps.into_iter().next(),
        })
    }

    fn timestep_position(&self, object: &str, current: &str) -> Result<(Vec<String>, usize)> {
        let timesteps = self.sorted_timesteps(object)?;
        let index = timesteps
            .iter()
            .position(|t| t == current)
            .ok_or_else(|| PipelineError::not_found("时间步", current))?;
        Ok((timesteps, index))
    }

    /// 上一个时间步，已是第一个时返回自身
    pub fn timestep_before(&self, object: &str, current: &str) -> Result<String> {
        let (timesteps, index) = self.timestep_position(object, current)?;
        Ok(timesteps[index.saturating_sub(1)].clone())
    }

    /// 下一个时间步，已是最后一个时返回自身
    pub fn timestep_after(&self, object: &str, current: &str) -> Result<String> {
        let (timesteps, index) = self.timestep_position(object, current)?;
        Ok(timesteps[(index + 1).min(timesteps.len() - 1)].clone())
    }

    /// 节点场文件路径，优先 .bin，其次 .bin.gz
    pub fn field_path(&self, object: &str, timestep: &str, field: &str) -> Result<PathBuf> {
        validate_name(timestep)?;
        validate_name(field)?;
        let dir = self.output_dir(object)?.join(timestep).join(NODE_OUTPUT_DIR);
        [format!("{}.bin", field), format!("{}.bin.gz", field)]
            .into_iter()
            .map(|file| dir.join(file))
            .find(|path| path.is_file())
            .ok_or_else(|| PipelineError::not_found("字段", format!("{}/{}/{}", object, timestep, field)))
    }

    /// 网格文件路径（相对数据根目录）
    pub fn mesh_path(&self, relative: &str) -> Result<PathBuf> {
        resolve_relative(&self.root, relative)
    }
}
