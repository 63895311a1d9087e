// ==========================================
// 操作员分配系统 - 文本报表
// ==========================================
// 分配树: 款式 → 工序 → 操作员（空工序标注为无法满足）
// 效率表: 款式达成效率与目标效率对比
// ==========================================

use crate::domain::plan::AllocationPlan;
use crate::domain::transaction::Operator;
use crate::report::csv_export::{name_lookup, round2};
use indexmap::IndexMap;
use std::fmt::Write;

pub fn render_distribution_tree(plan: &AllocationPlan, operators: &[Operator]) -> String {
    let names = name_lookup(operators);
    let mut out = String::new();

    for (style_id, operations) in plan.iter() {
        let _ = writeln!(out, "Style: {}", style_id);
        if operations.is_empty() {
            let _ = writeln!(out, "  (no operations)");
        }
        for (operation_id, assigned) in operations {
            let _ = writeln!(out, "  Operation: {}", operation_id);
            if assigned.is_empty() {
                let _ = writeln!(out, "    (unfilled)");
            }
            for operator_id in assigned {
                match names.get(operator_id.as_str()) {
                    Some(name) => {
                        let _ = writeln!(out, "    - {} - {}", operator_id, name);
                    }
                    None => {
                        let _ = writeln!(out, "    - {}", operator_id);
                    }
                }
            }
        }
    }
    out
}

pub fn render_efficiency_table(achieved: &IndexMap<String, f64>, target: f64) -> String {
    let width = achieved
        .keys()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
        .max("Style".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  Achieved Efficiency (%)  Target (%)", "Style");
    for (style_id, value) in achieved {
        let marker = if *value >= target { "" } else { "  below target" };
        let _ = writeln!(
            out,
            "{:<width$}  {:>23.2}  {:>10.2}{}",
            style_id,
            round2(*value),
            target,
            marker
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_tree() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "X", vec!["1".to_string(), "9".to_string()]);
        plan.set_operation("S", "Y", vec![]);
        let tree = render_distribution_tree(&plan, &[Operator::new("1", "Alice")]);

        assert_eq!(
            tree,
            "Style: S\n  Operation: X\n    - 1 - Alice\n    - 9\n  Operation: Y\n    (unfilled)\n"
        );
    }

    #[test]
    fn test_efficiency_table_marks_below_target() {
        let mut achieved = IndexMap::new();
        achieved.insert("S".to_string(), 80.0);
        achieved.insert("LONGSTYLE".to_string(), 50.126);
        let table = render_efficiency_table(&achieved, 75.0);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("S        "));
        assert!(!lines[1].contains("below target"));
        assert!(lines[2].contains("50.13"));
        assert!(lines[2].ends_with("below target"));
    }
}
