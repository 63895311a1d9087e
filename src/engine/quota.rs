// ==========================================
// 操作员分配系统 - 款式配额分配
// ==========================================
// 规则: quota[s] = ceil(opsCount[s] / T × P)，T = Σ opsCount
// 按调用方给定的款式顺序，各款式依次从剩余池取连续前缀 min(quota, 剩余)
// 红线: 配额独立向上取整，Σ quota 可能超过 P；靠后的款式可能分到 0 人，
//       该行为取决于款式顺序，必须原样保留
// ==========================================

use crate::domain::transaction::TransactionRecord;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// 单款式配额结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleQuota {
    pub style_id: String,
    pub operations_count: usize,
    pub quota: usize,
    /// 实际分得的操作员（剩余池的连续前缀）
    pub operators: Vec<String>,
}

impl StyleQuota {
    /// 配额未被满足的人数
    pub fn shortfall(&self) -> usize {
        self.quota.saturating_sub(self.operators.len())
    }
}

// ==========================================
// QuotaAllocator - 配额分配器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct QuotaAllocator {
    // 无状态
}

impl QuotaAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 统计各款式去重工序数（含质检工序）
    ///
    /// 款式按调用方顺序去重；无流水的款式计 0
    pub fn count_operations(
        &self,
        transactions: &[TransactionRecord],
        styles: &[String],
    ) -> IndexMap<String, usize> {
        let mut ops: IndexMap<&str, HashSet<&str>> = styles
            .iter()
            .map(|s| (s.as_str(), HashSet::new()))
            .collect();
        for r in transactions {
            if let Some(set) = ops.get_mut(r.style_id.as_str()) {
                set.insert(r.operation_id.as_str());
            }
        }
        ops.into_iter()
            .map(|(style, set)| (style.to_string(), set.len()))
            .collect()
    }

    /// 切分操作员池
    ///
    /// # 参数
    /// - `transactions`: 流水表（其他款式的行会被忽略）
    /// - `styles`: 款式处理顺序
    /// - `operators`: 操作员池（顺序即分配顺序，重复 ID 只计一次）
    #[instrument(skip(self, transactions, styles, operators), fields(
        styles_count = styles.len(),
        pool_size = operators.len()
    ))]
    pub fn allocate(
        &self,
        transactions: &[TransactionRecord],
        styles: &[String],
        operators: &[String],
    ) -> IndexMap<String, StyleQuota> {
        let counts = self.count_operations(transactions, styles);
        let total: usize = counts.values().sum();

        // 操作员池去重，保持首次出现顺序
        let pool: IndexSet<&str> = operators.iter().map(|s| s.as_str()).collect();
        let pool_size = pool.len();
        let mut remaining = pool.into_iter();

        counts
            .into_iter()
            .map(|(style_id, operations_count)| {
                let quota = if total == 0 {
                    0
                } else {
                    (operations_count as f64 / total as f64 * pool_size as f64).ceil() as usize
                };
                let operators: Vec<String> =
                    remaining.by_ref().take(quota).map(str::to_string).collect();

                if operators.len() < quota {
                    warn!(
                        style_id = %style_id,
                        quota,
                        received = operators.len(),
                        "操作员池不足，款式配额未满足"
                    );
                } else {
                    debug!(style_id = %style_id, operations_count, quota, "款式配额");
                }

                let quota_entry = StyleQuota {
                    style_id: style_id.clone(),
                    operations_count,
                    quota,
                    operators,
                };
                (style_id, quota_entry)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(style: &str, op: &str) -> TransactionRecord {
        TransactionRecord {
            style_id: style.to_string(),
            operation_id: op.to_string(),
            machine_type: "SNLS".to_string(),
            operator_id: "9".to_string(),
            operator_name: "N".to_string(),
            standard_time: 10.0,
            actual_time: 100.0,
            quantity: 10.0,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            shift: None,
        }
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![tx("A", "A1"), tx("A", "A2"), tx("A", "A1"), tx("B", "B1")]
    }

    #[test]
    fn test_quota_starvation_follows_list_order() {
        let pool = ids(&["1", "2", "3", "4", "5"]);
        let quotas = QuotaAllocator::new().allocate(&sample(), &ids(&["A", "B"]), &pool);

        assert_eq!(quotas["A"].quota, 4);
        assert_eq!(quotas["B"].quota, 2);
        assert_eq!(quotas["A"].operators, ids(&["1", "2", "3", "4"]));
        assert_eq!(quotas["B"].operators, ids(&["5"]));
        assert_eq!(quotas["B"].shortfall(), 1);
    }

    #[test]
    fn test_quota_order_dependence() {
        let pool = ids(&["1", "2", "3", "4", "5"]);
        let quotas = QuotaAllocator::new().allocate(&sample(), &ids(&["B", "A"]), &pool);

        assert_eq!(quotas.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(quotas["B"].operators, ids(&["1", "2"]));
        assert_eq!(quotas["A"].operators, ids(&["3", "4", "5"]));
    }

    #[test]
    fn test_quota_style_without_transactions() {
        let pool = ids(&["1", "2"]);
        let quotas = QuotaAllocator::new().allocate(&sample(), &ids(&["Z", "B"]), &pool);
        assert_eq!(quotas["Z"].operations_count, 0);
        assert_eq!(quotas["Z"].quota, 0);
        assert_eq!(quotas["B"].operators, ids(&["1", "2"]));
    }

    #[test]
    fn test_quota_zero_total_and_empty_pool() {
        let quotas = QuotaAllocator::new().allocate(&[], &ids(&["A"]), &ids(&["1"]));
        assert_eq!(quotas["A"].quota, 0);
        assert!(quotas["A"].operators.is_empty());

        let quotas = QuotaAllocator::new().allocate(&sample(), &ids(&["A", "B"]), &[]);
        assert!(quotas.values().all(|q| q.quota == 0 && q.operators.is_empty()));
    }

    #[test]
    fn test_duplicate_styles_processed_once() {
        let quotas =
            QuotaAllocator::new().allocate(&sample(), &ids(&["A", "A", "B"]), &ids(&["1", "2", "3"]));
        assert_eq!(quotas.len(), 2);
        assert_eq!(quotas["A"].quota, 2);
    }
}
