// ==========================================
// 操作员分配系统 - 班次产能分析
// ==========================================
// 职责: 历史单件用时、单班可完成件数、指定操作员单件用时
// 说明: 只读报表，不参与分配
// ==========================================

use crate::config::AllocationConfigReader;
use crate::config::allocation_config::DEFAULT_SHIFT_DURATION_SECS;
use crate::domain::transaction::TransactionRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// 款式/工序历史平均用时
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalAverage {
    pub style_id: String,
    pub operation_id: String,
    pub average_actual_time_per_unit: f64,
    pub standard_time: f64,
}

/// 单班可完成件数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationsPerShift {
    pub style_id: String,
    pub operation_id: String,
    pub average_actual_time_per_unit: f64,
    pub standard_time: f64,
    pub operations_per_shift_standard: Option<f64>,
    pub operations_per_shift_actual: Option<f64>,
}

/// 操作员在款式/工序上的平均用时
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorAverageTime {
    pub operator_id: String,
    pub style_id: String,
    pub operation_id: String,
    pub average_actual_time_per_unit: f64,
    pub total_quantity: f64,
}

#[derive(Default)]
struct MeanAcc {
    per_unit_sum: f64,
    per_unit_count: usize,
    standard_sum: f64,
    quantity_sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, r: &TransactionRecord) {
        // 产量为 0 的记录无单件用时
        if r.quantity > 0.0 {
            self.per_unit_sum += r.actual_time / r.quantity;
            self.per_unit_count += 1;
        }
        self.standard_sum += r.standard_time;
        self.quantity_sum += r.quantity;
        self.count += 1;
    }

    fn per_unit_mean(&self) -> f64 {
        if self.per_unit_count == 0 {
            0.0
        } else {
            self.per_unit_sum / self.per_unit_count as f64
        }
    }
}

// ==========================================
// ShiftOperationsCalculator
// ==========================================
#[derive(Debug, Clone)]
pub struct ShiftOperationsCalculator {
    shift_duration_secs: f64,
}

impl ShiftOperationsCalculator {
    pub fn new(shift_duration_secs: f64) -> Self {
        Self {
            shift_duration_secs,
        }
    }

    pub fn from_config<C: AllocationConfigReader + ?Sized>(config: &C) -> Self {
        Self::new(config.shift_duration_secs())
    }

    /// 每个 (款式, 工序) 的平均单件实际用时与平均标准工时
    pub fn calculate_historical_average_time(
        &self,
        records: &[TransactionRecord],
    ) -> Vec<HistoricalAverage> {
        let mut groups: BTreeMap<(&str, &str), MeanAcc> = BTreeMap::new();
        for r in records {
            groups
                .entry((r.style_id.as_str(), r.operation_id.as_str()))
                .or_default()
                .push(r);
        }

        groups
            .into_iter()
            .map(|((style_id, operation_id), acc)| HistoricalAverage {
                style_id: style_id.to_string(),
                operation_id: operation_id.to_string(),
                average_actual_time_per_unit: acc.per_unit_mean(),
                standard_time: acc.standard_sum / acc.count as f64,
            })
            .collect()
    }

    /// 单班可完成件数 = 班次时长 / 用时（用时 <= 0 时为 None）
    pub fn operations_per_shift(&self, historical: &[HistoricalAverage]) -> Vec<OperationsPerShift> {
        let per_shift = |secs: f64| (secs > 0.0).then(|| self.shift_duration_secs / secs);

        historical
            .iter()
            .map(|h| OperationsPerShift {
                style_id: h.style_id.clone(),
                operation_id: h.operation_id.clone(),
                average_actual_time_per_unit: h.average_actual_time_per_unit,
                standard_time: h.standard_time,
                operations_per_shift_standard: per_shift(h.standard_time),
                operations_per_shift_actual: per_shift(h.average_actual_time_per_unit),
            })
            .collect()
    }

    /// 指定操作员在各 (款式, 工序) 上的平均单件用时与总产量
    pub fn calculate_operator_avg_time(
        &self,
        records: &[TransactionRecord],
        operators: &[String],
    ) -> Vec<OperatorAverageTime> {
        let selected: HashSet<&str> = operators.iter().map(|s| s.as_str()).collect();

        let mut groups: BTreeMap<(&str, &str, &str), MeanAcc> = BTreeMap::new();
        for r in records.iter().filter(|r| selected.contains(r.operator_id.as_str())) {
            groups
                .entry((
                    r.operator_id.as_str(),
                    r.style_id.as_str(),
                    r.operation_id.as_str(),
                ))
                .or_default()
                .push(r);
        }

        groups
            .into_iter()
            .map(|((operator_id, style_id, operation_id), acc)| OperatorAverageTime {
                operator_id: operator_id.to_string(),
                style_id: style_id.to_string(),
                operation_id: operation_id.to_string(),
                average_actual_time_per_unit: acc.per_unit_mean(),
                total_quantity: acc.quantity_sum,
            })
            .collect()
    }
}

impl Default for ShiftOperationsCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFT_DURATION_SECS)
    }
}
