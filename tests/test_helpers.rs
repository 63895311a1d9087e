// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 流水/统计记录构造、临时 CSV 生成
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use operator_allocation::domain::types::ExperienceCategory;
use operator_allocation::domain::{StatRecord, TransactionRecord};
use std::io::Write;
use tempfile::NamedTempFile;

/// 源系统列名
pub const TRANSACTION_HEADER: &str = "ODPI_ST_Description,ODPI_PC_Description,ODPI_MC_Type,ODPI_EM_Key,Operator_FullName,ODPI_OC_Standard_Time,ODPI_Actual_Time,ODPI_Quantity,ODPI_Date";

pub fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// 创建流水记录（标准工时为 std，其余字段取固定值）
pub fn tx(style: &str, op: &str, std: f64) -> TransactionRecord {
    TransactionRecord {
        style_id: style.to_string(),
        operation_id: op.to_string(),
        machine_type: "SNLS".to_string(),
        operator_id: "0".to_string(),
        operator_name: "Nobody".to_string(),
        standard_time: std,
        actual_time: 100.0,
        quantity: 10.0,
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        shift: None,
    }
}

/// 创建统计记录
pub fn stat(style: &str, op: &str, operator: &str, freq: u32, weight: f64, eff: f64) -> StatRecord {
    StatRecord {
        style_id: style.to_string(),
        operation_id: op.to_string(),
        operator_id: operator.to_string(),
        operator_name: Some(format!("Operator {}", operator)),
        average_efficiency: eff,
        sum_quantity: 100.0,
        days_worked: 10,
        operation_frequency: freq,
        machine_frequency: freq,
        efficiency_category: None,
        experience_category: ExperienceCategory::Fresher,
        base_weightage: weight,
        normalized_weightage: weight,
    }
}

/// 写入临时 CSV（带源系统表头）
pub fn write_transaction_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "{}", TRANSACTION_HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}
