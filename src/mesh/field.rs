use crate::color::ScalarRange;
use crate::error::{PipelineError, Result};

/// 单个时间步的节点标量值，按节点编号对齐
pub type ScalarField = Vec<f64>;

/// 检查标量场长度是否与节点数一致
pub fn check_field(field: &[f64], node_count: usize) -> Result<()> {
    if field.len() != node_count {
        return Err(PipelineError::ShapeMismatch {
            expected: node_count,
            actual: field.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timestep {
    pub label: String,
    pub values: ScalarField,
}

/// 一次运行中加载的时间步序列
///
/// 每次运行各自拥有自己的序列；追加的时间步不会覆盖已有数据。
#[derive(Debug, Clone, Default)]
pub struct TimestepSeries {
    node_count: usize,
    steps: Vec<Timestep>,
}

impl TimestepSeries {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            steps: Vec::new(),
        }
    }

    /// 追加一个时间步，长度必须与节点数一致
    pub fn push(&mut self, label: impl Into<String>, values: ScalarField) -> Result<usize> {
        check_field(&values, self.node_count)?;
        self.steps.push(Timestep {
            label: label.into(),
            values,
        });
        Ok(self.steps.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Timestep> {
        self.steps.get(index)
    }

    pub fn find(&self, label: &str) -> Option<&Timestep> {
        self.steps.iter().find(|step| step.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timestep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// 所有时间步共同的取值范围，保证动画播放时颜色刻度一致
    pub fn global_range(&self) -> ScalarRange {
        ScalarRange::of(self.steps.iter().flat_map(|step| step.values.iter().copied()))
    }
}
