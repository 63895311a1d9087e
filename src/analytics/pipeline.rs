// ==========================================
// 操作员分配系统 - 统计流水线
// ==========================================
// 职责: 流水表 → 效率 → 聚合 → 分类 → 权重，生成 StatRecord 表
// 附带: 瓶颈工序、操作员姓名回填
// ==========================================

use crate::analytics::aggregation::aggregate_operator_data_grouped;
use crate::analytics::categorization::{
    calculate_operator_weightage, categorize_with_grouped_averages,
};
use crate::analytics::efficiency::{Bottleneck, EfficiencyCalculator};
use crate::config::{AllocationConfigReader, WeightageCoefficients};
use crate::domain::stats::StatRecord;
use crate::domain::transaction::{EfficiencyRecord, TransactionRecord};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{info, instrument};

/// 统计流水线输出
#[derive(Debug, Clone, Default)]
pub struct StatisticsOutput {
    pub efficiency_records: Vec<EfficiencyRecord>,
    pub stat_records: Vec<StatRecord>,
    pub bottlenecks: IndexMap<String, Vec<Bottleneck>>,
}

impl StatisticsOutput {
    /// 效率在有效区间内的流水（保持原顺序）
    pub fn in_band_transactions(&self) -> Vec<TransactionRecord> {
        self.efficiency_records
            .iter()
            .map(|e| e.record.clone())
            .collect()
    }
}

// ==========================================
// StatisticsPipeline
// ==========================================
pub struct StatisticsPipeline {
    calculator: EfficiencyCalculator,
    days_threshold: u32,
    bottleneck_count: usize,
    coefficients: WeightageCoefficients,
}

impl StatisticsPipeline {
    pub fn from_config<C: AllocationConfigReader + ?Sized>(config: &C) -> Self {
        Self {
            calculator: EfficiencyCalculator::from_config(config),
            days_threshold: config.experience_days_threshold(),
            bottleneck_count: config.bottleneck_count(),
            coefficients: config.weightage_coefficients().clone(),
        }
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn run(&self, records: &[TransactionRecord]) -> StatisticsOutput {
        let efficiency_records = self.calculator.calculate_efficiency(records);
        let aggregates = aggregate_operator_data_grouped(&efficiency_records);
        let mut stat_records = categorize_with_grouped_averages(&aggregates, self.days_threshold);
        calculate_operator_weightage(&mut stat_records, &self.coefficients);

        // 姓名取该操作员首次出现的记录
        let mut names: HashMap<&str, &str> = HashMap::new();
        for r in records {
            names
                .entry(r.operator_id.as_str())
                .or_insert(r.operator_name.as_str());
        }
        for s in stat_records.iter_mut() {
            s.operator_name = names.get(s.operator_id.as_str()).map(|n| n.to_string());
        }

        self.finish(efficiency_records, stat_records)
    }

    /// 使用外部统计表：只计算效率记录与瓶颈工序
    #[instrument(skip(self, records, stat_records), fields(count = records.len()))]
    pub fn run_with_stats(
        &self,
        records: &[TransactionRecord],
        stat_records: Vec<StatRecord>,
    ) -> StatisticsOutput {
        let efficiency_records = self.calculator.calculate_efficiency(records);
        self.finish(efficiency_records, stat_records)
    }

    fn finish(
        &self,
        efficiency_records: Vec<EfficiencyRecord>,
        stat_records: Vec<StatRecord>,
    ) -> StatisticsOutput {
        let bottlenecks = self
            .calculator
            .identify_bottlenecks(&efficiency_records, self.bottleneck_count);

        info!(
            efficiency_records = efficiency_records.len(),
            stat_records = stat_records.len(),
            "统计流水线完成"
        );

        StatisticsOutput {
            efficiency_records,
            stat_records,
            bottlenecks,
        }
    }
}

impl Default for StatisticsPipeline {
    fn default() -> Self {
        Self::from_config(&crate::config::AllocationConfig::default())
    }
}
