// ==========================================
// 操作员分配系统 - 分配方案领域模型
// ==========================================
// 职责: 款式 → 工序 → 操作员列表
// 红线: 列表保持插入顺序（即分配顺序），后续抽调按此顺序取第一个
// ==========================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个款式的工序 → 操作员列表（插入顺序 = 工序处理顺序）
pub type StyleAllocation = IndexMap<String, Vec<String>>;

// ==========================================
// AllocationPlan - 分配方案
// ==========================================
// 单次规划调用内创建、原地修改、最终返回
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationPlan {
    styles: IndexMap<String, StyleAllocation>,
}

/// 方案中的一条分配（款式, 工序, 操作员）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment<'a> {
    pub style_id: &'a str,
    pub operation_id: &'a str,
    pub operator_id: &'a str,
}

impl AllocationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记款式（已存在则保持原位置）
    pub fn ensure_style(&mut self, style_id: &str) -> &mut StyleAllocation {
        self.styles.entry(style_id.to_string()).or_default()
    }

    pub fn style(&self, style_id: &str) -> Option<&StyleAllocation> {
        self.styles.get(style_id)
    }

    pub fn style_mut(&mut self, style_id: &str) -> Option<&mut StyleAllocation> {
        self.styles.get_mut(style_id)
    }

    /// 写入工序的操作员列表（工序已存在时保持原位置）
    pub fn set_operation(&mut self, style_id: &str, operation_id: &str, operators: Vec<String>) {
        self.ensure_style(style_id)
            .insert(operation_id.to_string(), operators);
    }

    /// 查询工序的操作员列表
    pub fn operators(&self, style_id: &str, operation_id: &str) -> Option<&[String]> {
        self.styles
            .get(style_id)
            .and_then(|ops| ops.get(operation_id))
            .map(|v| v.as_slice())
    }

    /// 款式列表（插入顺序）
    pub fn style_ids(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleAllocation)> {
        self.styles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// 展开为 (款式, 工序, 操作员) 序列
    pub fn assignments(&self) -> impl Iterator<Item = Assignment<'_>> {
        self.styles.iter().flat_map(|(style_id, ops)| {
            ops.iter().flat_map(move |(operation_id, operators)| {
                operators.iter().map(move |operator_id| Assignment {
                    style_id,
                    operation_id,
                    operator_id,
                })
            })
        })
    }

    /// 已分配操作员总数
    pub fn assigned_count(&self) -> usize {
        self.assignments().count()
    }

    /// 仍为空的工序 (款式, 工序)
    pub fn empty_operations(&self) -> Vec<(String, String)> {
        self.styles
            .iter()
            .flat_map(|(style_id, ops)| {
                ops.iter()
                    .filter(|(_, operators)| operators.is_empty())
                    .map(move |(operation_id, _)| (style_id.clone(), operation_id.clone()))
            })
            .collect()
    }

    /// 查找操作员所在位置
    pub fn locate(&self, operator_id: &str) -> Option<(&str, &str)> {
        self.assignments()
            .find(|a| a.operator_id == operator_id)
            .map(|a| (a.style_id, a.operation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_operation_preserves_position() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("S", "X", vec![]);
        plan.set_operation("S", "Y", vec!["2".to_string()]);
        plan.set_operation("S", "X", vec!["1".to_string()]);

        let ops: Vec<&String> = plan.style("S").unwrap().keys().collect();
        assert_eq!(ops, vec!["X", "Y"]);
        assert_eq!(plan.operators("S", "X").unwrap(), &["1".to_string()]);
        assert_eq!(plan.assigned_count(), 2);
        assert!(plan.empty_operations().is_empty());
    }

    #[test]
    fn test_empty_operations_and_locate() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("A", "CUT", vec!["9".to_string()]);
        plan.set_operation("B", "SEW", vec![]);

        assert_eq!(
            plan.empty_operations(),
            vec![("B".to_string(), "SEW".to_string())]
        );
        assert_eq!(plan.locate("9"), Some(("A", "CUT")));
        assert_eq!(plan.locate("10"), None);
    }

    #[test]
    fn test_plan_serializes_in_insertion_order() {
        let mut plan = AllocationPlan::new();
        plan.set_operation("Z", "B", vec!["1".to_string()]);
        plan.set_operation("A", "A", vec![]);
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"Z":{"B":["1"]},"A":{"A":[]}}"#);
    }
}
