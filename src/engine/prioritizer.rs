// ==========================================
// 操作员分配系统 - 工序优先级排序
// ==========================================
// 规则:
// 1) 剔除质检类工序（标签大小写不敏感）
// 2) 按工序求标准工时均值
// 3) 均值降序；均值相同按工序 ID 升序
// ==========================================

use crate::config::AllocationConfigReader;
use crate::config::allocation_config::AllocationConfig;
use crate::domain::transaction::TransactionRecord;
use crate::engine::error::{EngineError, EngineResult};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// 排序后的工序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedOperation {
    pub operation_id: String,
    pub mean_standard_time: f64,
}

// ==========================================
// OperationPrioritizer
// ==========================================
#[derive(Debug, Clone)]
pub struct OperationPrioritizer {
    quality_check_labels: Vec<String>,
}

impl OperationPrioritizer {
    pub fn new(quality_check_labels: Vec<String>) -> Self {
        Self {
            quality_check_labels,
        }
    }

    pub fn from_config<C: AllocationConfigReader + ?Sized>(config: &C) -> Self {
        Self::new(config.quality_check_labels().to_vec())
    }

    pub fn is_quality_check(&self, operation_id: &str) -> bool {
        let normalized = operation_id.trim();
        self.quality_check_labels
            .iter()
            .any(|label| label.trim().eq_ignore_ascii_case(normalized))
    }

    /// 对单个款式的工序排序
    ///
    /// # 错误
    /// - 标准工时为负或非有限数值
    #[instrument(skip(self, transactions), fields(style_id = %style_id))]
    pub fn prioritize(
        &self,
        transactions: &[TransactionRecord],
        style_id: &str,
    ) -> EngineResult<Vec<PrioritizedOperation>> {
        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for r in transactions.iter().filter(|r| r.style_id == style_id) {
            if self.is_quality_check(&r.operation_id) {
                continue;
            }
            if !r.standard_time.is_finite() || r.standard_time < 0.0 {
                return Err(EngineError::InvalidStandardTime {
                    style_id: r.style_id.clone(),
                    operation_id: r.operation_id.clone(),
                    value: r.standard_time,
                });
            }
            let entry = sums.entry(r.operation_id.as_str()).or_insert((0.0, 0));
            entry.0 += r.standard_time;
            entry.1 += 1;
        }

        // BTreeMap 已按工序 ID 升序，稳定排序保留该次序作为平局规则
        let mut ops: Vec<PrioritizedOperation> = sums
            .into_iter()
            .map(|(operation_id, (sum, count))| PrioritizedOperation {
                operation_id: operation_id.to_string(),
                mean_standard_time: sum / count as f64,
            })
            .collect();
        ops.sort_by(|a, b| b.mean_standard_time.total_cmp(&a.mean_standard_time));

        debug!(operations = ops.len(), "工序排序完成");
        Ok(ops)
    }
}

impl Default for OperationPrioritizer {
    fn default() -> Self {
        Self::new(AllocationConfig::default().quality_check_labels)
    }
}

/// 款式内全部工序标准工时之和（headcount 比例的分母）
pub fn total_standard_time(ops: &[PrioritizedOperation]) -> f64 {
    ops.iter().map(|o| o.mean_standard_time).sum()
}
