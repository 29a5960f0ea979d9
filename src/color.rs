//! 标量到颜色的映射
//!
//! 同一个标量值在同一调色板和范围下总是得到同一个颜色；超出范围的值被截断到两端。

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// 标量取值范围
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarRange {
    pub min: f64,
    pub max: f64,
}

impl ScalarRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 从数据中统计范围，忽略 NaN 与无穷；没有有效值时返回 [0, 0]
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return Self::new(0.0, 0.0);
        }
        Self { min, max }
    }

    /// 检查外部传入的范围：两端必须是有限值且 min <= max
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(PipelineError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// 归一化到 [0, 1]；退化范围与非有限值都落在低端
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !value.is_finite() || span.is_nan() || span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// 调色板
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// 蓝 → 青 → 绿 → 黄 → 红，分段线性
    #[default]
    Rainbow,
    /// 查看器着色器使用的三条高斯通道曲线
    Thermal,
}

const RAINBOW_STOPS: [[f64; 3]; 5] = [
    [0.0, 0.0, 255.0],
    [0.0, 255.0, 255.0],
    [0.0, 255.0, 0.0],
    [255.0, 255.0, 0.0],
    [255.0, 0.0, 0.0],
];

// 着色器温度轴 [-200, 400] 上的 (中心, 标准差)
const THERMAL_AXIS: (f64, f64) = (-200.0, 400.0);
const THERMAL_RED: (f64, f64) = (400.0, 300.0);
const THERMAL_GREEN: (f64, f64) = (20.0, 200.0);
const THERMAL_BLUE: (f64, f64) = (-200.0, 100.0);

fn gaussian(x: f64, (center, sigma): (f64, f64)) -> f64 {
    (-(x - center) * (x - center) / (2.0 * sigma * sigma)).exp()
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl Palette {
    /// t ∈ [0, 1] 对应的颜色
    pub fn sample(self, t: f64) -> [u8; 3] {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Palette::Rainbow => {
                let segments = (RAINBOW_STOPS.len() - 1) as f64;
                let position = t * segments;
                let lower = (position.floor() as usize).min(RAINBOW_STOPS.len() - 2);
                let frac = position - lower as f64;
                let (a, b) = (RAINBOW_STOPS[lower], RAINBOW_STOPS[lower + 1]);
                [0, 1, 2].map(|i| channel(a[i] + (b[i] - a[i]) * frac))
            }
            Palette::Thermal => {
                let temp = THERMAL_AXIS.0 + t * (THERMAL_AXIS.1 - THERMAL_AXIS.0);
                [
                    channel(gaussian(temp, THERMAL_RED) * 255.0),
                    channel(gaussian(temp, THERMAL_GREEN) * 255.0),
                    channel(gaussian(temp, THERMAL_BLUE) * 255.0),
                ]
            }
        }
    }
}

/// 调色板与取值范围的组合
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMap {
    pub palette: Palette,
    pub range: ScalarRange,
}

impl ColorMap {
    pub fn new(palette: Palette, range: ScalarRange) -> Self {
        Self { palette, range }
    }

    pub fn color(&self, value: f64) -> [u8; 3] {
        self.palette.sample(self.range.normalize(value))
    }

    /// 按原始节点编号查找标量并着色，结果与压缩顶点一一对应
    pub fn map(&self, source_ids: &[usize], field: &[f64]) -> Result<Vec<[u8; 3]>> {
        source_ids
            .iter()
            .map(|&id| {
                field
                    .get(id)
                    .map(|&value| self.color(value))
                    .ok_or_else(|| PipelineError::ShapeMismatch {
                        expected: id + 1,
                        actual: field.len(),
                    })
            })
            .collect()
    }
}
