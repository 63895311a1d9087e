// ==========================================
// 操作员分配系统 - 分配参数
// ==========================================
// 职责: 分配核心与统计层的可调参数（JSON 持久化对象）
// 约定: 所有字段缺省时回落到默认值
// ==========================================

use serde::{Deserialize, Serialize};

/// 单工序人数上限默认值
pub const DEFAULT_MAX_HEADCOUNT: usize = 7;

/// 标准班次时长（8 小时，秒）
pub const DEFAULT_SHIFT_DURATION_SECS: f64 = 28_800.0;

// ==========================================
// AllocationConfig - 分配参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// 单工序人数下限
    pub min_headcount: usize,

    /// 单工序人数上限
    pub max_headcount: usize,

    /// 质检类工序标签（大小写不敏感），不参与优先级排序与分配
    pub quality_check_labels: Vec<String>,

    /// 有效效率区间下限（%）
    pub efficiency_min: f64,

    /// 有效效率区间上限（%）
    pub efficiency_max: f64,

    /// 出勤天数超过该值视为熟练工
    pub experience_days_threshold: u32,

    /// 班次时长（秒）
    pub shift_duration_secs: f64,

    /// 每个款式报告的瓶颈工序数
    pub bottleneck_count: usize,

    /// 目标效率（%），报表展示用
    pub target_efficiency: f64,

    /// 权重系数
    pub weightage: WeightageCoefficients,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            min_headcount: 1,
            max_headcount: DEFAULT_MAX_HEADCOUNT,
            quality_check_labels: vec!["QUALITY CHECK".to_string(), "QUALITY CHECKING".to_string()],
            efficiency_min: 5.0,
            efficiency_max: 200.0,
            experience_days_threshold: 30,
            shift_duration_secs: DEFAULT_SHIFT_DURATION_SECS,
            bottleneck_count: 3,
            target_efficiency: 75.0,
            weightage: WeightageCoefficients::default(),
        }
    }
}

/// 权重系数（操作频次、机台频次权重更高）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightageCoefficients {
    pub efficiency: f64,
    pub quantity: f64,
    pub days_worked: f64,
    pub operation_frequency: f64,
    pub machine_frequency: f64,
}

impl Default for WeightageCoefficients {
    fn default() -> Self {
        Self {
            efficiency: 0.2,
            quantity: 0.2,
            days_worked: 0.1,
            operation_frequency: 0.25,
            machine_frequency: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: AllocationConfig =
            serde_json::from_str(r#"{"max_headcount": 4, "weightage": {"quantity": 0.3}}"#).unwrap();
        assert_eq!(config.max_headcount, 4);
        assert_eq!(config.min_headcount, 1);
        assert_eq!(config.quality_check_labels.len(), 2);
        assert_eq!(config.weightage.quantity, 0.3);
        assert_eq!(config.weightage.operation_frequency, 0.25);
    }

    #[test]
    fn test_default_coefficients_sum_to_one() {
        let w = WeightageCoefficients::default();
        let sum = w.efficiency + w.quantity + w.days_worked + w.operation_frequency + w.machine_frequency;
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
