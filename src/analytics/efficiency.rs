// ==========================================
// 操作员分配系统 - 效率计算
// ==========================================
// 职责: 单条流水效率 + 有效区间过滤 + 瓶颈工序识别
// 输入: 清洗后的流水表
// 输出: EfficiencyRecord 列表
// ==========================================

use crate::config::AllocationConfigReader;
use crate::domain::transaction::{EfficiencyRecord, TransactionRecord};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 瓶颈工序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub style_id: String,
    pub operation_id: String,
    pub mean_efficiency: f64,
}

// ==========================================
// EfficiencyCalculator - 效率计算器
// ==========================================
#[derive(Debug, Clone)]
pub struct EfficiencyCalculator {
    efficiency_min: f64,
    efficiency_max: f64,
}

impl EfficiencyCalculator {
    pub fn new(efficiency_min: f64, efficiency_max: f64) -> Self {
        Self {
            efficiency_min,
            efficiency_max,
        }
    }

    pub fn from_config<C: AllocationConfigReader + ?Sized>(config: &C) -> Self {
        let (min, max) = config.efficiency_bounds();
        Self::new(min, max)
    }

    /// 计算效率
    ///
    /// 规则:
    /// 1) mean_standard_time = 同 (款式, 工序) 所有记录标准工时均值
    /// 2) total_standard_time = mean_standard_time × quantity
    /// 3) efficiency = total_standard_time / actual_time × 100
    /// 4) 仅保留 efficiency ∈ [min, max]（实际用时 <= 0 的记录直接丢弃）
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn calculate_efficiency(&self, records: &[TransactionRecord]) -> Vec<EfficiencyRecord> {
        let mut sums: HashMap<(&str, &str), (f64, usize)> = HashMap::new();
        for r in records {
            let entry = sums
                .entry((r.style_id.as_str(), r.operation_id.as_str()))
                .or_insert((0.0, 0));
            entry.0 += r.standard_time;
            entry.1 += 1;
        }

        let result: Vec<EfficiencyRecord> = records
            .iter()
            .filter(|r| r.actual_time > 0.0)
            .filter_map(|r| {
                let (sum, count) = sums[&(r.style_id.as_str(), r.operation_id.as_str())];
                let mean_standard_time = sum / count as f64;
                let total_standard_time = mean_standard_time * r.quantity;
                let efficiency = total_standard_time / r.actual_time * 100.0;

                (efficiency >= self.efficiency_min && efficiency <= self.efficiency_max).then(|| {
                    EfficiencyRecord {
                        record: r.clone(),
                        mean_standard_time,
                        total_standard_time,
                        efficiency,
                    }
                })
            })
            .collect();

        debug!(kept = result.len(), dropped = records.len() - result.len(), "效率过滤完成");
        result
    }

    /// 识别瓶颈工序: 每款式平均效率最低的 n 个工序（升序）
    pub fn identify_bottlenecks(
        &self,
        records: &[EfficiencyRecord],
        n: usize,
    ) -> IndexMap<String, Vec<Bottleneck>> {
        // 款式按首次出现顺序，工序效率累计
        let mut by_style: IndexMap<&str, HashMap<&str, (f64, usize)>> = IndexMap::new();
        for r in records {
            let entry = by_style
                .entry(r.record.style_id.as_str())
                .or_default()
                .entry(r.record.operation_id.as_str())
                .or_insert((0.0, 0));
            entry.0 += r.efficiency;
            entry.1 += 1;
        }

        by_style
            .into_iter()
            .map(|(style_id, ops)| {
                let mut means: Vec<Bottleneck> = ops
                    .into_iter()
                    .map(|(operation_id, (sum, count))| Bottleneck {
                        style_id: style_id.to_string(),
                        operation_id: operation_id.to_string(),
                        mean_efficiency: sum / count as f64,
                    })
                    .collect();
                means.sort_by(|a, b| {
                    a.mean_efficiency
                        .total_cmp(&b.mean_efficiency)
                        .then_with(|| a.operation_id.cmp(&b.operation_id))
                });
                means.truncate(n);
                (style_id.to_string(), means)
            })
            .collect()
    }
}

impl Default for EfficiencyCalculator {
    fn default() -> Self {
        Self::new(5.0, 200.0)
    }
}
