// ==========================================
// 操作员分配系统 - 工序分配引擎
// ==========================================
// 职责: 按优先级逐个工序计算目标人数并贪心选人
// 规则:
// - headcount = clamp(ceil(工序工时 / 款式总工时 × |可用操作员|), min, max)
// - 候选: 属于本款式可用切片 + 有本 (款式, 工序) 记录 + 未被占用
// - 排名: (Operation_Frequency 降序, Normalized_Weightage 降序)，平局保持表内顺序
// 红线: 选中即写入 AssignedSet，候选不足时能派几人派几人（可能为 0）
// ==========================================

use crate::config::AllocationConfigReader;
use crate::config::allocation_config::DEFAULT_MAX_HEADCOUNT;
use crate::domain::plan::AllocationPlan;
use crate::domain::stats::StatRecord;
use crate::engine::assigned_set::AssignedSet;
use crate::engine::prioritizer::{total_standard_time, PrioritizedOperation};
use crate::engine::stat_index::StatIndex;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// 候选排名: 频次优先，权重其次（均降序）
pub fn rank_candidates(a: &StatRecord, b: &StatRecord) -> Ordering {
    b.operation_frequency
        .cmp(&a.operation_frequency)
        .then_with(|| b.normalized_weightage.total_cmp(&a.normalized_weightage))
}

// ==========================================
// AssignmentEngine
// ==========================================
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    min_headcount: usize,
    max_headcount: usize,
}

impl AssignmentEngine {
    pub fn new(min_headcount: usize, max_headcount: usize) -> Self {
        Self {
            min_headcount,
            max_headcount,
        }
    }

    pub fn from_config<C: AllocationConfigReader + ?Sized>(config: &C) -> Self {
        let (min, max) = config.headcount_bounds();
        Self::new(min, max)
    }

    /// 目标人数
    ///
    /// 款式总工时为 0 时比例视为 0，结果落到下限
    pub fn target_headcount(&self, operation_time: f64, style_total_time: f64, available: usize) -> usize {
        let proportion = if style_total_time > 0.0 {
            operation_time / style_total_time
        } else {
            0.0
        };
        let raw = (proportion * available as f64).ceil() as usize;
        raw.max(self.min_headcount).min(self.max_headcount)
    }

    /// 单工序贪心选人
    ///
    /// # 返回
    /// 按排名顺序选中的操作员（已写入 `assigned`）
    pub fn assign_operation(
        &self,
        index: &StatIndex<'_>,
        style_id: &str,
        operation_id: &str,
        available: &HashSet<&str>,
        headcount: usize,
        assigned: &mut AssignedSet,
    ) -> Vec<String> {
        let mut eligible: Vec<&StatRecord> = index
            .for_operation(style_id, operation_id)
            .into_iter()
            .filter(|r| available.contains(r.operator_id.as_str()))
            .filter(|r| !assigned.contains(&r.operator_id))
            .collect();
        // 稳定排序
        eligible.sort_by(|a, b| rank_candidates(a, b));

        let selected: Vec<String> = eligible
            .into_iter()
            .take(headcount)
            .map(|r| r.operator_id.clone())
            .collect();
        assigned.extend(&selected);
        selected
    }

    /// 按优先级顺序分配整个款式，结果按处理顺序写入方案
    #[instrument(skip_all, fields(style_id = %style_id, available = available.len(), operations = operations.len()))]
    pub fn assign_style(
        &self,
        index: &StatIndex<'_>,
        style_id: &str,
        operations: &[PrioritizedOperation],
        available: &[String],
        assigned: &mut AssignedSet,
        plan: &mut AllocationPlan,
    ) {
        let slice: HashSet<&str> = available.iter().map(|s| s.as_str()).collect();
        let total_time = total_standard_time(operations);
        plan.ensure_style(style_id);

        for op in operations {
            let headcount = self.target_headcount(op.mean_standard_time, total_time, available.len());
            let selected = self.assign_operation(
                index,
                style_id,
                &op.operation_id,
                &slice,
                headcount,
                assigned,
            );
            debug!(
                operation_id = %op.operation_id,
                headcount,
                selected = selected.len(),
                "工序分配"
            );
            plan.set_operation(style_id, &op.operation_id, selected);
        }
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new(1, DEFAULT_MAX_HEADCOUNT)
    }
}
