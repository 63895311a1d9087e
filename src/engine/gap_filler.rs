// ==========================================
// 操作员分配系统 - 空工序回补
// ==========================================
// 时机: 单个款式所有工序完成一次贪心分配之后
// 顺序: 按工序优先级顺序检查，访问时为空才处理
// 回补策略:
// 1) 非熟练回补: 可用切片内、未占用、且在本 (款式, 工序) 无记录的操作员，
//    取 Normalized_Weightage 最高的一人
// 2) 借调: 按方案插入顺序找到第一个非空工序，取走其最早分配的操作员
// 红线: 借调不检查捐出方是否被掏空，由全局再分配兜底
// ==========================================

use crate::domain::plan::AllocationPlan;
use crate::domain::stats::StatRecord;
use crate::engine::assigned_set::AssignedSet;
use crate::engine::prioritizer::PrioritizedOperation;
use crate::engine::stat_index::StatIndex;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// 单次回补动作
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapFill {
    Unskilled {
        operation_id: String,
        operator_id: String,
    },
    Stolen {
        operation_id: String,
        operator_id: String,
        donor_operation_id: String,
    },
    Unfilled {
        operation_id: String,
    },
}

// ==========================================
// GapFiller
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct GapFiller {
    // 无状态
}

impl GapFiller {
    pub fn new() -> Self {
        Self {}
    }

    /// 非熟练候选: 权重最高者，平局取表内靠前者
    pub fn find_unskilled<'a>(
        &self,
        index: &StatIndex<'a>,
        style_id: &str,
        operation_id: &str,
        available: &HashSet<&str>,
        assigned: &AssignedSet,
    ) -> Option<&'a StatRecord> {
        let mut best: Option<&'a StatRecord> = None;
        for r in index.records() {
            if !available.contains(r.operator_id.as_str())
                || assigned.contains(&r.operator_id)
                || r.matches(style_id, operation_id)
            {
                continue;
            }
            match best {
                Some(b) if r.normalized_weightage <= b.normalized_weightage => {}
                _ => best = Some(r),
            }
        }
        best
    }

    /// 回补一个款式内的空工序
    #[instrument(skip_all, fields(style_id = %style_id))]
    pub fn fill_style(
        &self,
        index: &StatIndex<'_>,
        style_id: &str,
        operations: &[PrioritizedOperation],
        available: &[String],
        assigned: &mut AssignedSet,
        plan: &mut AllocationPlan,
    ) -> Vec<GapFill> {
        let slice: HashSet<&str> = available.iter().map(|s| s.as_str()).collect();
        let mut actions = Vec::new();

        for op in operations {
            let is_empty = plan
                .operators(style_id, &op.operation_id)
                .map_or(true, |ops| ops.is_empty());
            if !is_empty {
                continue;
            }

            if let Some(r) = self.find_unskilled(index, style_id, &op.operation_id, &slice, assigned) {
                debug!(operation_id = %op.operation_id, operator_id = %r.operator_id, "非熟练回补");
                assigned.insert(&r.operator_id);
                plan.set_operation(style_id, &op.operation_id, vec![r.operator_id.clone()]);
                actions.push(GapFill::Unskilled {
                    operation_id: op.operation_id.clone(),
                    operator_id: r.operator_id.clone(),
                });
                continue;
            }

            match Self::steal_first(plan, style_id) {
                Some((donor_operation_id, operator_id)) => {
                    debug!(
                        operation_id = %op.operation_id,
                        donor = %donor_operation_id,
                        operator_id = %operator_id,
                        "借调回补"
                    );
                    assigned.insert(&operator_id);
                    plan.set_operation(style_id, &op.operation_id, vec![operator_id.clone()]);
                    actions.push(GapFill::Stolen {
                        operation_id: op.operation_id.clone(),
                        operator_id,
                        donor_operation_id,
                    });
                }
                None => {
                    warn!(operation_id = %op.operation_id, "款式内无可借调操作员，工序保持为空");
                    actions.push(GapFill::Unfilled {
                        operation_id: op.operation_id.clone(),
                    });
                }
            }
        }

        actions
    }

    /// 取走第一个非空工序的首位操作员
    fn steal_first(plan: &mut AllocationPlan, style_id: &str) -> Option<(String, String)> {
        let style = plan.style_mut(style_id)?;
        let (donor, operators) = style.iter_mut().find(|(_, ops)| !ops.is_empty())?;
        Some((donor.clone(), operators.remove(0)))
    }
}
