// ==========================================
// 操作员分配系统 - 分配编排器
// ==========================================
// 流程:
// 1) 配额: 一次性切分操作员池
// 2) 按调用方款式顺序: 工序排序 → 贪心分配 → 空工序回补
// 3) 全部款式完成后: 全局再分配
// 4) 评估: 各款式达成效率
// 红线: AssignedSet 与方案只属于本次调用；单线程，顺序即语义
// ==========================================

use crate::config::AllocationConfigReader;
use crate::config::allocation_config::AllocationConfig;
use crate::domain::plan::AllocationPlan;
use crate::domain::stats::StatRecord;
use crate::domain::transaction::TransactionRecord;
use crate::engine::assigned_set::AssignedSet;
use crate::engine::assignment::AssignmentEngine;
use crate::engine::error::EngineResult;
use crate::engine::evaluator::EfficiencyEvaluator;
use crate::engine::gap_filler::{GapFill, GapFiller};
use crate::engine::prioritizer::OperationPrioritizer;
use crate::engine::quota::{QuotaAllocator, StyleQuota};
use crate::engine::redistributor::{RedistributionSummary, Redistributor};
use crate::engine::stat_index::StatIndex;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument};

/// 一次分配调用的完整结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub plan: AllocationPlan,
    pub quotas: IndexMap<String, StyleQuota>,
    pub gap_fills: IndexMap<String, Vec<GapFill>>,
    pub redistribution: RedistributionSummary,
    /// 款式 → 达成效率（未取整）
    pub achieved_efficiency: IndexMap<String, f64>,
}

impl AllocationResult {
    /// 最终仍为空的 (款式, 工序)
    pub fn unfilled_operations(&self) -> Vec<(String, String)> {
        self.plan.empty_operations()
    }

    /// 配额未被满足的款式（剩余池不足）
    pub fn starved_styles(&self) -> Vec<&StyleQuota> {
        self.quotas.values().filter(|q| q.shortfall() > 0).collect()
    }

    /// 池中没有被分配到任何工序的操作员，保持池顺序
    pub fn unplaced_operators<'a>(&self, operators: &'a [String]) -> Vec<&'a str> {
        operators
            .iter()
            .map(|id| id.as_str())
            .filter(|id| self.plan.locate(id).is_none())
            .collect()
    }
}

// ==========================================
// AllocationOrchestrator
// ==========================================
pub struct AllocationOrchestrator {
    quota: QuotaAllocator,
    prioritizer: OperationPrioritizer,
    assignment: AssignmentEngine,
    gap_filler: GapFiller,
    redistributor: Redistributor,
    evaluator: EfficiencyEvaluator,
}

impl AllocationOrchestrator {
    pub fn new<C: AllocationConfigReader + ?Sized>(config: &C) -> Self {
        Self {
            quota: QuotaAllocator::new(),
            prioritizer: OperationPrioritizer::from_config(config),
            assignment: AssignmentEngine::from_config(config),
            gap_filler: GapFiller::new(),
            redistributor: Redistributor::new(),
            evaluator: EfficiencyEvaluator::new(),
        }
    }

    /// 执行一次分配
    ///
    /// # 参数
    /// - `transactions`: 清洗后的流水表
    /// - `stats`: 分类统计表（只读）
    /// - `operators`: 操作员池（有序）
    /// - `styles`: 款式处理顺序（重复款式只处理首次）
    ///
    /// # 错误
    /// - 统计表主键重复或数值非法
    /// - 流水表标准工时非法
    #[instrument(skip_all, fields(
        transactions = transactions.len(),
        stats = stats.len(),
        operators = operators.len(),
        styles = styles.len()
    ))]
    pub fn allocate(
        &self,
        transactions: &[TransactionRecord],
        stats: &[StatRecord],
        operators: &[String],
        styles: &[String],
    ) -> EngineResult<AllocationResult> {
        let index = StatIndex::build(stats)?;
        let quotas = self.quota.allocate(transactions, styles, operators);

        let mut assigned = AssignedSet::new();
        let mut plan = AllocationPlan::new();
        let mut gap_fills = IndexMap::new();

        for (style_id, quota) in &quotas {
            let operations = self.prioritizer.prioritize(transactions, style_id)?;
            self.assignment.assign_style(
                &index,
                style_id,
                &operations,
                &quota.operators,
                &mut assigned,
                &mut plan,
            );
            let fills = self.gap_filler.fill_style(
                &index,
                style_id,
                &operations,
                &quota.operators,
                &mut assigned,
                &mut plan,
            );
            gap_fills.insert(style_id.clone(), fills);
        }

        let redistribution = self.redistributor.redistribute(&mut plan, &mut assigned);
        let achieved_efficiency = self.evaluator.evaluate(&plan, &index);

        info!(
            styles = plan.style_ids().count(),
            assigned = plan.assigned_count(),
            unfilled = redistribution.unfilled.len(),
            "分配完成"
        );

        Ok(AllocationResult {
            plan,
            quotas,
            gap_fills,
            redistribution,
            achieved_efficiency,
        })
    }
}

impl Default for AllocationOrchestrator {
    fn default() -> Self {
        Self::new(&AllocationConfig::default())
    }
}
