// ==========================================
// 操作员分配系统 - 统计表索引
// ==========================================
// 职责: 一次构建，按 (款式, 工序, 操作员) 直接查找 StatRecord，
//       按 (款式, 工序) 取记录列表（保持表内顺序）
// 红线: 只读；构建时拒绝重复主键与非有限数值
// ==========================================

use crate::domain::stats::StatRecord;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashMap;

pub struct StatIndex<'a> {
    records: &'a [StatRecord],
    by_key: HashMap<(&'a str, &'a str, &'a str), usize>,
    by_operation: HashMap<(&'a str, &'a str), Vec<usize>>,
}

impl<'a> StatIndex<'a> {
    pub fn build(records: &'a [StatRecord]) -> EngineResult<Self> {
        let mut by_key = HashMap::with_capacity(records.len());
        let mut by_operation: HashMap<(&str, &str), Vec<usize>> = HashMap::new();

        for (idx, r) in records.iter().enumerate() {
            let row = idx + 1;
            check_finite(row, "Average_Efficiency", r.average_efficiency)?;
            check_finite(row, "Normalized_Weightage", r.normalized_weightage)?;

            let key = (
                r.style_id.as_str(),
                r.operation_id.as_str(),
                r.operator_id.as_str(),
            );
            if by_key.insert(key, idx).is_some() {
                return Err(EngineError::DuplicateStatRecord {
                    row,
                    style_id: r.style_id.clone(),
                    operation_id: r.operation_id.clone(),
                    operator_id: r.operator_id.clone(),
                });
            }
            by_operation.entry((key.0, key.1)).or_default().push(idx);
        }

        Ok(Self {
            records,
            by_key,
            by_operation,
        })
    }

    /// 精确查找 (款式, 工序, 操作员)
    pub fn get(&self, style_id: &str, operation_id: &str, operator_id: &str) -> Option<&'a StatRecord> {
        self.by_key
            .get(&(style_id, operation_id, operator_id))
            .map(|&idx| &self.records[idx])
    }

    /// 某 (款式, 工序) 的全部记录，按表内顺序
    pub fn for_operation(&self, style_id: &str, operation_id: &str) -> Vec<&'a StatRecord> {
        let records = self.records;
        self.by_operation
            .get(&(style_id, operation_id))
            .map(|indices| indices.iter().map(|&idx| &records[idx]).collect())
            .unwrap_or_default()
    }

    pub fn records(&self) -> &'a [StatRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn check_finite(row: usize, field: &'static str, value: f64) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidStatRecord {
            row,
            field,
            message: format!("非有限数值: {}", value),
        })
    }
}
