// ==========================================
// 操作员分配系统 - CSV 报表导出
// ==========================================
// 报表:
// - 分配报表: Style, Operation, Operator Key, Operator Name
// - 达成效率: Style, Achieved Efficiency (%)（保留 2 位小数）
// - 分类统计 / 单班件数 / 操作员单件用时 / 瓶颈工序
// 说明: 取整只在此处发生
// ==========================================

use crate::analytics::{Bottleneck, OperationsPerShift, OperatorAverageTime};
use crate::domain::plan::AllocationPlan;
use crate::domain::stats::StatRecord;
use crate::domain::transaction::Operator;
use crate::report::error::ReportResult;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const ALLOCATION_REPORT_FILE: &str = "operator_allocation_report.csv";
pub const EFFICIENCY_REPORT_FILE: &str = "efficiency_report.csv";
pub const CATEGORIZED_DATA_FILE: &str = "categorized_data.csv";
pub const OPERATIONS_DATA_FILE: &str = "operations_data.csv";
pub const OPERATOR_TIMES_FILE: &str = "operator_times.csv";
pub const BOTTLENECKS_FILE: &str = "bottlenecks.csv";

/// 展示用取整（2 位小数）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 操作员 ID → 姓名
pub fn name_lookup(operators: &[Operator]) -> HashMap<&str, &str> {
    let mut names = HashMap::with_capacity(operators.len());
    for op in operators {
        names
            .entry(op.operator_id.as_str())
            .or_insert(op.operator_name.as_str());
    }
    names
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AllocationRow<'a> {
    #[serde(rename = "Style")]
    pub style: &'a str,
    #[serde(rename = "Operation")]
    pub operation: &'a str,
    #[serde(rename = "Operator Key")]
    pub operator_key: &'a str,
    #[serde(rename = "Operator Name")]
    pub operator_name: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EfficiencyRow<'a> {
    #[serde(rename = "Style")]
    pub style: &'a str,
    #[serde(rename = "Achieved Efficiency (%)")]
    pub achieved_efficiency: f64,
}

/// 展开分配方案（空工序不产生行）
pub fn allocation_rows<'a>(
    plan: &'a AllocationPlan,
    names: &HashMap<&'a str, &'a str>,
) -> Vec<AllocationRow<'a>> {
    plan.assignments()
        .map(|a| AllocationRow {
            style: a.style_id,
            operation: a.operation_id,
            operator_key: a.operator_id,
            operator_name: names.get(a.operator_id).copied().unwrap_or_default(),
        })
        .collect()
}

pub fn efficiency_rows(achieved: &IndexMap<String, f64>) -> Vec<EfficiencyRow<'_>> {
    achieved
        .iter()
        .map(|(style, value)| EfficiencyRow {
            style,
            achieved_efficiency: round2(*value),
        })
        .collect()
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: impl IntoIterator<Item = T>) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_allocation_report<W: Write>(
    writer: W,
    plan: &AllocationPlan,
    operators: &[Operator],
) -> ReportResult<()> {
    let names = name_lookup(operators);
    write_rows(writer, allocation_rows(plan, &names))
}

pub fn write_efficiency_report<W: Write>(writer: W, achieved: &IndexMap<String, f64>) -> ReportResult<()> {
    write_rows(writer, efficiency_rows(achieved))
}

pub fn write_stat_records<W: Write>(writer: W, records: &[StatRecord]) -> ReportResult<()> {
    write_rows(writer, records)
}

pub fn write_operations_per_shift<W: Write>(writer: W, rows: &[OperationsPerShift]) -> ReportResult<()> {
    write_rows(writer, rows)
}

pub fn write_operator_times<W: Write>(writer: W, rows: &[OperatorAverageTime]) -> ReportResult<()> {
    write_rows(writer, rows)
}

pub fn write_bottlenecks<W: Write>(
    writer: W,
    bottlenecks: &IndexMap<String, Vec<Bottleneck>>,
) -> ReportResult<()> {
    write_rows(writer, bottlenecks.values().flatten())
}

/// 创建文件并写入
pub fn write_csv_file<F>(path: &Path, write: F) -> ReportResult<()>
where
    F: FnOnce(File) -> ReportResult<()>,
{
    let file = File::create(path)?;
    write(file)?;
    debug!(path = %path.display(), "报表已写入");
    Ok(())
}
