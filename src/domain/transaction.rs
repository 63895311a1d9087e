// ==========================================
// 操作员分配系统 - 生产流水领域模型
// ==========================================
// 职责: 清洗后的生产流水记录、效率记录、操作员
// 红线: 引擎只读这些结构,不修改
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TransactionRecord - 生产流水记录
// ==========================================
// 用途: 导入层输出,统计层与分配核心的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    // ===== 业务键 =====
    pub style_id: String,     // 款式
    pub operation_id: String, // 工序（款式内唯一）
    pub machine_type: String, // 机台类型

    // ===== 操作员 =====
    pub operator_id: String,
    pub operator_name: String,

    // ===== 工时与产量 =====
    pub standard_time: f64, // 标准工时 (秒/件)
    pub actual_time: f64,   // 实际用时 (秒)
    pub quantity: f64,      // 产量 (件)

    // ===== 时间 =====
    pub date: NaiveDate,
    pub shift: Option<String>,
}

// ==========================================
// EfficiencyRecord - 带效率的流水记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRecord {
    #[serde(flatten)]
    pub record: TransactionRecord,
    pub mean_standard_time: f64,  // 同款式同工序平均标准工时
    pub total_standard_time: f64, // mean_standard_time × quantity
    pub efficiency: f64,          // 百分比
}

// ==========================================
// Operator - 操作员
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operator {
    pub operator_id: String,
    pub operator_name: String,
}

impl Operator {
    pub fn new(operator_id: impl Into<String>, operator_name: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
            operator_name: operator_name.into(),
        }
    }

    /// 下拉框/报表中的展示名 "key - name"
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.operator_id, self.operator_name)
    }
}

/// 按首次出现顺序收集操作员（去重）
pub fn distinct_operators(records: &[TransactionRecord]) -> Vec<Operator> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.operator_id.clone()))
        .map(|r| Operator::new(r.operator_id.clone(), r.operator_name.clone()))
        .collect()
}

/// 按首次出现顺序收集款式（去重）
pub fn distinct_styles(records: &[TransactionRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.style_id.clone()))
        .map(|r| r.style_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(style: &str, operator: &str, name: &str) -> TransactionRecord {
        TransactionRecord {
            style_id: style.to_string(),
            operation_id: "OP".to_string(),
            machine_type: "SNLS".to_string(),
            operator_id: operator.to_string(),
            operator_name: name.to_string(),
            standard_time: 10.0,
            actual_time: 100.0,
            quantity: 10.0,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            shift: None,
        }
    }

    #[test]
    fn test_distinct_operators_keeps_first_appearance() {
        let records = vec![
            record("S1", "7", "Asha"),
            record("S1", "3", "Ravi"),
            record("S2", "7", "Asha"),
        ];
        let ops = distinct_operators(&records);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].operator_id, "7");
        assert_eq!(ops[1].display_label(), "3 - Ravi");
    }

    #[test]
    fn test_distinct_styles() {
        let records = vec![record("B", "1", "x"), record("A", "1", "x"), record("B", "2", "y")];
        assert_eq!(distinct_styles(&records), vec!["B".to_string(), "A".to_string()]);
    }
}
