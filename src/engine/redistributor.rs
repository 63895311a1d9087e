// ==========================================
// 操作员分配系统 - 全局再分配
// ==========================================
// 时机: 所有款式处理完毕后扫描一次
// 规则: 空工序从同款式内第一个人数 > 1 的工序取走首位操作员
// 红线: 找不到捐出方时工序保持为空（无法满足），不报错
// ==========================================

use crate::domain::plan::AllocationPlan;
use crate::engine::assigned_set::AssignedSet;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// 一次再分配移动
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub style_id: String,
    pub from_operation_id: String,
    pub to_operation_id: String,
    pub operator_id: String,
}

/// 再分配结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RedistributionSummary {
    pub transfers: Vec<Transfer>,
    /// 再分配后仍为空的 (款式, 工序)
    pub unfilled: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct Redistributor {
    // 无状态
}

impl Redistributor {
    pub fn new() -> Self {
        Self {}
    }

    #[instrument(skip_all)]
    pub fn redistribute(
        &self,
        plan: &mut AllocationPlan,
        assigned: &mut AssignedSet,
    ) -> RedistributionSummary {
        let mut summary = RedistributionSummary::default();

        // 捐出方移走一人后仍 >= 1，已登记的空工序集合不会扩大
        for (style_id, operation_id) in plan.empty_operations() {
            match Self::take_from_donor(plan, &style_id) {
                Some((donor, operator_id)) => {
                    debug!(
                        style_id = %style_id,
                        operation_id = %operation_id,
                        donor = %donor,
                        operator_id = %operator_id,
                        "再分配"
                    );
                    assigned.insert(&operator_id);
                    plan.set_operation(&style_id, &operation_id, vec![operator_id.clone()]);
                    summary.transfers.push(Transfer {
                        style_id,
                        from_operation_id: donor,
                        to_operation_id: operation_id,
                        operator_id,
                    });
                }
                None => {
                    warn!(style_id = %style_id, operation_id = %operation_id, "无捐出方，工序无法满足");
                    summary.unfilled.push((style_id, operation_id));
                }
            }
        }

        info!(
            transfers = summary.transfers.len(),
            unfilled = summary.unfilled.len(),
            "全局再分配完成"
        );
        summary
    }

    fn take_from_donor(plan: &mut AllocationPlan, style_id: &str) -> Option<(String, String)> {
        let style = plan.style_mut(style_id)?;
        let (donor, operators) = style.iter_mut().find(|(_, ops)| ops.len() > 1)?;
        Some((donor.clone(), operators.remove(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_redistribute_takes_first_from_multi_operator_donor() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "A", ids(&["1"]));
        plan.set_operation("S", "B", ids(&["2", "3"]));
        plan.set_operation("S", "C", vec![]);
        let mut assigned = AssignedSet::new();

        let summary = Redistributor::new().redistribute(&mut plan, &mut assigned);

        assert_eq!(plan.operators("S", "B").unwrap(), ["3".to_string()]);
        assert_eq!(plan.operators("S", "C").unwrap(), ["2".to_string()]);
        assert_eq!(summary.transfers.len(), 1);
        assert_eq!(summary.transfers[0].from_operation_id, "B");
        assert!(summary.unfilled.is_empty());
    }

    #[test]
    fn test_redistribute_exhausted_leaves_empty() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "A", ids(&["1"]));
        plan.set_operation("S", "B", vec![]);
        // 其他款式的富余人手不跨款式借用
        plan.set_operation("T", "Q", ids(&["2", "3"]));
        let mut assigned = AssignedSet::new();

        let summary = Redistributor::new().redistribute(&mut plan, &mut assigned);

        assert!(plan.operators("S", "B").unwrap().is_empty());
        assert_eq!(summary.unfilled, vec![("S".to_string(), "B".to_string())]);
        assert_eq!(plan.operators("T", "Q").unwrap().len(), 2);
    }

    #[test]
    fn test_redistribute_fills_multiple_gaps_in_order() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "A", ids(&["1", "2", "3"]));
        plan.set_operation("S", "B", vec![]);
        plan.set_operation("S", "C", vec![]);
        let mut assigned = AssignedSet::new();

        Redistributor::new().redistribute(&mut plan, &mut assigned);

        assert_eq!(plan.operators("S", "A").unwrap(), ["3".to_string()]);
        assert_eq!(plan.operators("S", "B").unwrap(), ["1".to_string()]);
        assert_eq!(plan.operators("S", "C").unwrap(), ["2".to_string()]);
    }
}
