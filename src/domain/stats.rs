// ==========================================
// 操作员分配系统 - 统计领域模型
// ==========================================
// 职责: 分组聚合结果 + 分类统计记录 (StatRecord)
// 红线: 分配核心把 StatRecord 视为只读输入
// ==========================================

use crate::domain::types::{EfficiencyCategory, ExperienceCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// OperatorAggregate - 款式/工序/操作员分组聚合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorAggregate {
    pub style_id: String,
    pub operation_id: String,
    pub operator_id: String,
    pub average_efficiency: f64,
    pub sum_quantity: f64,
    pub standard_time: f64,
    pub operation_frequency: u32, // 该操作员做该工序的记录数
    pub machine_frequency: u32,   // 该操作员最常用机台类型的记录数
    pub days_worked: u32,         // 出勤天数（去重日期）
}

// ==========================================
// StatRecord - 分类统计记录
// ==========================================
// 主键: (style_id, operation_id, operator_id)
// 列名与统计导出报表一致，同时接受 snake_case 别名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    // ===== 主键 =====
    #[serde(rename = "ODPI_ST_Description", alias = "style_id")]
    pub style_id: String,
    #[serde(rename = "ODPI_PC_Description", alias = "operation_id")]
    pub operation_id: String,
    #[serde(rename = "ODPI_EM_Key", alias = "operator_id")]
    pub operator_id: String,
    #[serde(rename = "Operator_FullName", alias = "operator_name", default)]
    pub operator_name: Option<String>,

    // ===== 历史表现 =====
    #[serde(rename = "Average_Efficiency", alias = "average_efficiency")]
    pub average_efficiency: f64, // 已截断到 [5, 200]
    #[serde(rename = "Sum_Quantity", alias = "sum_quantity", default)]
    pub sum_quantity: f64,
    #[serde(rename = "Days_Worked", alias = "days_worked", default)]
    pub days_worked: u32,
    #[serde(rename = "Operation_Frequency", alias = "operation_frequency")]
    pub operation_frequency: u32,
    #[serde(rename = "Machine_Frequency", alias = "machine_frequency")]
    pub machine_frequency: u32,

    // ===== 分类 =====
    #[serde(rename = "Efficiency_Category", alias = "efficiency_category", default)]
    pub efficiency_category: Option<EfficiencyCategory>,
    #[serde(rename = "Experience_Category", alias = "experience_category")]
    pub experience_category: ExperienceCategory,

    // ===== 权重 =====
    #[serde(rename = "Base_Weightage", alias = "base_weightage", default)]
    pub base_weightage: f64,
    #[serde(rename = "Normalized_Weightage", alias = "normalized_weightage")]
    pub normalized_weightage: f64, // [0, 1]，全表求和为 1
}

impl StatRecord {
    /// 是否属于指定 (款式, 工序)
    pub fn matches(&self, style_id: &str, operation_id: &str) -> bool {
        self.style_id == style_id && self.operation_id == operation_id
    }
}

/// StatRecord 表必需列（缺失即为致命前置条件错误）
pub const REQUIRED_STAT_COLUMNS: &[(&str, &str)] = &[
    ("ODPI_ST_Description", "style_id"),
    ("ODPI_PC_Description", "operation_id"),
    ("ODPI_EM_Key", "operator_id"),
    ("Average_Efficiency", "average_efficiency"),
    ("Operation_Frequency", "operation_frequency"),
    ("Machine_Frequency", "machine_frequency"),
    ("Normalized_Weightage", "normalized_weightage"),
    ("Experience_Category", "experience_category"),
];
