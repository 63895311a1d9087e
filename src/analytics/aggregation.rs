// ==========================================
// 操作员分配系统 - 操作员分组聚合
// ==========================================
// 职责: 按 (款式, 工序, 操作员) 聚合效率/产量/频次，附加机台频次与出勤天数
// 输出顺序: 按 (款式, 工序, 操作员) 字典序，保证下游排名可复现
// ==========================================

use crate::domain::stats::OperatorAggregate;
use crate::domain::transaction::EfficiencyRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::instrument;

#[derive(Default)]
struct GroupAccumulator {
    efficiency_sum: f64,
    quantity_sum: f64,
    standard_time_sum: f64,
    count: u32,
}

/// 分组聚合
///
/// - average_efficiency: 组内效率均值
/// - sum_quantity: 组内产量合计
/// - standard_time: 组内标准工时均值
/// - operation_frequency: 组内记录数
/// - machine_frequency: 操作员在各机台类型上记录数的最大值
/// - days_worked: 操作员去重日期数
#[instrument(skip(records), fields(count = records.len()))]
pub fn aggregate_operator_data_grouped(records: &[EfficiencyRecord]) -> Vec<OperatorAggregate> {
    let mut groups: BTreeMap<(&str, &str, &str), GroupAccumulator> = BTreeMap::new();
    let mut machine_counts: HashMap<&str, HashMap<&str, u32>> = HashMap::new();
    let mut dates: HashMap<&str, HashSet<NaiveDate>> = HashMap::new();

    for r in records {
        let tx = &r.record;
        let acc = groups
            .entry((
                tx.style_id.as_str(),
                tx.operation_id.as_str(),
                tx.operator_id.as_str(),
            ))
            .or_default();
        acc.efficiency_sum += r.efficiency;
        acc.quantity_sum += tx.quantity;
        acc.standard_time_sum += tx.standard_time;
        acc.count += 1;

        *machine_counts
            .entry(tx.operator_id.as_str())
            .or_default()
            .entry(tx.machine_type.as_str())
            .or_insert(0) += 1;

        dates
            .entry(tx.operator_id.as_str())
            .or_default()
            .insert(tx.date);
    }

    groups
        .into_iter()
        .map(|((style_id, operation_id, operator_id), acc)| {
            let machine_frequency = machine_counts
                .get(operator_id)
                .and_then(|m| m.values().copied().max())
                .unwrap_or(0);
            let days_worked = dates.get(operator_id).map(|d| d.len() as u32).unwrap_or(0);

            OperatorAggregate {
                style_id: style_id.to_string(),
                operation_id: operation_id.to_string(),
                operator_id: operator_id.to_string(),
                average_efficiency: acc.efficiency_sum / acc.count as f64,
                sum_quantity: acc.quantity_sum,
                standard_time: acc.standard_time_sum / acc.count as f64,
                operation_frequency: acc.count,
                machine_frequency,
                days_worked,
            }
        })
        .collect()
}
