// ==========================================
// 操作员分配系统 - 分类与权重
// ==========================================
// 职责: 效率类别、经验类别、综合权重及归一化
// 输出: StatRecord 表（分配核心的唯一统计输入）
// ==========================================

use crate::config::WeightageCoefficients;
use crate::domain::stats::{OperatorAggregate, StatRecord};
use crate::domain::types::{EfficiencyCategory, ExperienceCategory};
use std::collections::HashMap;
use tracing::instrument;

/// 样本均值与样本标准差（n < 2 时无标准差）
fn mean_and_sample_std(values: &[f64]) -> (f64, Option<f64>) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, None);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, Some(var.sqrt()))
}

/// 按组均值/标准差分类
///
/// - HighPerformer: > mean + std
/// - AboveAverage: > mean
/// - Average: 其余
/// - 经验: days_worked > threshold → Experienced
#[instrument(skip(aggregates), fields(count = aggregates.len()))]
pub fn categorize_with_grouped_averages(
    aggregates: &[OperatorAggregate],
    days_threshold: u32,
) -> Vec<StatRecord> {
    let mut groups: HashMap<(&str, &str), Vec<f64>> = HashMap::new();
    for a in aggregates {
        groups
            .entry((a.style_id.as_str(), a.operation_id.as_str()))
            .or_default()
            .push(a.average_efficiency);
    }
    let group_stats: HashMap<(&str, &str), (f64, Option<f64>)> = groups
        .into_iter()
        .map(|(key, values)| (key, mean_and_sample_std(&values)))
        .collect();

    aggregates
        .iter()
        .map(|a| {
            let (mean, std) = group_stats[&(a.style_id.as_str(), a.operation_id.as_str())];
            let efficiency_category = match std {
                Some(std) if a.average_efficiency > mean + std => EfficiencyCategory::HighPerformer,
                _ if a.average_efficiency > mean => EfficiencyCategory::AboveAverage,
                _ => EfficiencyCategory::Average,
            };
            let experience_category = if a.days_worked > days_threshold {
                ExperienceCategory::Experienced
            } else {
                ExperienceCategory::Fresher
            };

            StatRecord {
                style_id: a.style_id.clone(),
                operation_id: a.operation_id.clone(),
                operator_id: a.operator_id.clone(),
                operator_name: None,
                average_efficiency: a.average_efficiency,
                sum_quantity: a.sum_quantity,
                days_worked: a.days_worked,
                operation_frequency: a.operation_frequency,
                machine_frequency: a.machine_frequency,
                efficiency_category: Some(efficiency_category),
                experience_category,
                base_weightage: 0.0,
                normalized_weightage: 0.0,
            }
        })
        .collect()
}

/// 计算综合权重并归一化
///
/// base = Σ 系数 × (值 / 列最大值)；列最大值为 0 时该项贡献 0
/// normalized = base / Σ base（Σ base = 0 时全部为 0）
pub fn calculate_operator_weightage(records: &mut [StatRecord], coefficients: &WeightageCoefficients) {
    let max_of = |f: fn(&StatRecord) -> f64| -> f64 {
        records.iter().map(f).fold(0.0_f64, f64::max)
    };
    let max_eff = max_of(|r| r.average_efficiency);
    let max_qty = max_of(|r| r.sum_quantity);
    let max_days = max_of(|r| r.days_worked as f64);
    let max_op_freq = max_of(|r| r.operation_frequency as f64);
    let max_mc_freq = max_of(|r| r.machine_frequency as f64);

    let ratio = |value: f64, max: f64| if max > 0.0 { value / max } else { 0.0 };

    for r in records.iter_mut() {
        r.base_weightage = ratio(r.average_efficiency, max_eff) * coefficients.efficiency
            + ratio(r.sum_quantity, max_qty) * coefficients.quantity
            + ratio(r.days_worked as f64, max_days) * coefficients.days_worked
            + ratio(r.operation_frequency as f64, max_op_freq) * coefficients.operation_frequency
            + ratio(r.machine_frequency as f64, max_mc_freq) * coefficients.machine_frequency;
    }

    let total: f64 = records.iter().map(|r| r.base_weightage).sum();
    for r in records.iter_mut() {
        r.normalized_weightage = if total > 0.0 { r.base_weightage / total } else { 0.0 };
    }
}
