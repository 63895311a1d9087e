// ==========================================
// 操作员分配系统 - 方案效率评估
// ==========================================
// 规则: 款式达成效率 = 命中记录的 Average_Efficiency 均值
//       未命中（非熟练回补等）不计入；无命中时为 0
// 说明: 不做四舍五入，展示层负责
// ==========================================

use crate::domain::plan::AllocationPlan;
use crate::engine::stat_index::StatIndex;
use indexmap::IndexMap;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct EfficiencyEvaluator {
    // 无状态
}

impl EfficiencyEvaluator {
    pub fn new() -> Self {
        Self {}
    }

    #[instrument(skip_all, fields(styles = plan.style_ids().count()))]
    pub fn evaluate(&self, plan: &AllocationPlan, index: &StatIndex<'_>) -> IndexMap<String, f64> {
        plan.iter()
            .map(|(style_id, operations)| {
                let mut total = 0.0;
                let mut matched = 0usize;
                for (operation_id, operators) in operations {
                    for operator_id in operators {
                        if let Some(r) = index.get(style_id, operation_id, operator_id) {
                            total += r.average_efficiency;
                            matched += 1;
                        }
                    }
                }
                let achieved = if matched > 0 { total / matched as f64 } else { 0.0 };
                debug!(style_id = %style_id, matched, achieved, "款式达成效率");
                (style_id.clone(), achieved)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::StatRecord;
    use crate::domain::types::ExperienceCategory;

    fn stat(op: &str, operator: &str, eff: f64) -> StatRecord {
        StatRecord {
            style_id: "S".to_string(),
            operation_id: op.to_string(),
            operator_id: operator.to_string(),
            operator_name: None,
            average_efficiency: eff,
            sum_quantity: 0.0,
            days_worked: 0,
            operation_frequency: 1,
            machine_frequency: 1,
            efficiency_category: None,
            experience_category: ExperienceCategory::Experienced,
            base_weightage: 0.0,
            normalized_weightage: 0.5,
        }
    }

    #[test]
    fn test_evaluate_averages_matched_only() {
        let records = vec![stat("X", "1", 80.0), stat("Y", "2", 100.0), stat("Z", "3", 40.0)];
        let index = StatIndex::build(&records).unwrap();
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "X", vec!["1".to_string()]);
        plan.set_operation("S", "Y", vec!["2".to_string(), "3".to_string()]); // 3 在 Y 无记录

        let result = EfficiencyEvaluator::new().evaluate(&plan, &index);
        assert_eq!(result["S"], 90.0);
    }

    #[test]
    fn test_evaluate_zero_when_no_match() {
        let records = vec![stat("X", "1", 80.0)];
        let index = StatIndex::build(&records).unwrap();
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "Y", vec!["1".to_string()]);
        plan.ensure_style("T");

        let result = EfficiencyEvaluator::new().evaluate(&plan, &index);
        assert_eq!(result["S"], 0.0);
        assert_eq!(result["T"], 0.0);
    }
}
