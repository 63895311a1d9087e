// ==========================================
// 操作员分配系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 标准字段映射（支持源系统列名与 snake_case 别名）
// 红线: 必需列缺失 = 致命错误，不产出部分数据
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FieldMapper, RawTransactionRecord};
use std::collections::HashMap;

/// 标准字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    Style,
    Operation,
    MachineType,
    OperatorId,
    OperatorName,
    StandardTime,
    ActualTime,
    Quantity,
    Date,
    Shift,
}

impl TransactionField {
    /// 所有字段
    pub const ALL: [TransactionField; 10] = [
        TransactionField::Style,
        TransactionField::Operation,
        TransactionField::MachineType,
        TransactionField::OperatorId,
        TransactionField::OperatorName,
        TransactionField::StandardTime,
        TransactionField::ActualTime,
        TransactionField::Quantity,
        TransactionField::Date,
        TransactionField::Shift,
    ];

    /// 可接受的列名（按优先级）
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TransactionField::Style => &["ODPI_ST_Description", "style_id", "style"],
            TransactionField::Operation => &["ODPI_PC_Description", "operation_id", "operation"],
            TransactionField::MachineType => &["ODPI_MC_Type", "machine_type"],
            TransactionField::OperatorId => &["ODPI_EM_Key", "operator_id"],
            TransactionField::OperatorName => {
                &["Operator_FullName", "ODPI_EM_LastName", "operator_name"]
            }
            TransactionField::StandardTime => &["ODPI_OC_Standard_Time", "standard_time"],
            TransactionField::ActualTime => &["ODPI_Actual_Time", "actual_time"],
            TransactionField::Quantity => &["ODPI_Quantity", "quantity"],
            TransactionField::Date => &["ODPI_Date", "date"],
            TransactionField::Shift => &["ODPI_ODP_Shift", "shift"],
        }
    }

    /// 是否必需列
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            TransactionField::OperatorName | TransactionField::Shift
        )
    }
}

pub struct TransactionFieldMapper;

impl FieldMapper for TransactionFieldMapper {
    fn check_headers(&self, headers: &[String]) -> ImportResult<()> {
        for field in TransactionField::ALL.iter().filter(|f| f.is_required()) {
            let aliases = field.aliases();
            let present = aliases
                .iter()
                .any(|alias| headers.iter().any(|h| h == alias));
            if !present {
                return Err(ImportError::MissingColumn {
                    column: aliases[0].to_string(),
                    accepted: aliases.join(" / "),
                });
            }
        }
        Ok(())
    }

    fn map_to_raw_transaction(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawTransactionRecord {
        RawTransactionRecord {
            style_id: self.get_string(row, TransactionField::Style),
            operation_id: self.get_string(row, TransactionField::Operation),
            machine_type: self.get_string(row, TransactionField::MachineType),
            operator_id: self.get_string(row, TransactionField::OperatorId),
            operator_name: self.get_string(row, TransactionField::OperatorName),
            standard_time: self.get_string(row, TransactionField::StandardTime),
            actual_time: self.get_string(row, TransactionField::ActualTime),
            quantity: self.get_string(row, TransactionField::Quantity),
            date: self.get_string(row, TransactionField::Date),
            shift: self.get_string(row, TransactionField::Shift),
            row_number,
        }
    }
}

impl TransactionFieldMapper {
    /// 提取字符串字段（空白视为缺失），依次尝试所有别名
    fn get_string(&self, row: &HashMap<String, String>, field: TransactionField) -> Option<String> {
        for alias in field.aliases() {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_headers_accepts_aliases() {
        let mapper = TransactionFieldMapper;
        let ok = headers(&[
            "style_id",
            "ODPI_PC_Description",
            "machine_type",
            "ODPI_EM_Key",
            "standard_time",
            "ODPI_Actual_Time",
            "quantity",
            "ODPI_Date",
        ]);
        assert!(mapper.check_headers(&ok).is_ok());
    }

    #[test]
    fn test_check_headers_missing_standard_time() {
        let mapper = TransactionFieldMapper;
        let missing = headers(&[
            "style_id",
            "operation_id",
            "machine_type",
            "operator_id",
            "actual_time",
            "quantity",
            "date",
        ]);
        match mapper.check_headers(&missing) {
            Err(ImportError::MissingColumn { column, .. }) => {
                assert_eq!(column, "ODPI_OC_Standard_Time")
            }
            other => panic!("应为 MissingColumn，实际 {:?}", other),
        }
    }

    #[test]
    fn test_map_prefers_first_non_empty_alias() {
        let mapper = TransactionFieldMapper;
        let mut row = HashMap::new();
        row.insert("Operator_FullName".to_string(), "  ".to_string());
        row.insert("ODPI_EM_LastName".to_string(), "Perera".to_string());
        row.insert("ODPI_ST_Description".to_string(), " POLO ".to_string());

        let raw = mapper.map_to_raw_transaction(&row, 7);
        assert_eq!(raw.operator_name.as_deref(), Some("Perera"));
        assert_eq!(raw.style_id.as_deref(), Some("POLO"));
        assert_eq!(raw.quantity, None);
        assert_eq!(raw.row_number, 7);
    }
}
