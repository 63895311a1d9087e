// ==========================================
// 操作员分配系统 - 生产流水导入器
// ==========================================
// 职责: 整合导入流程，从文件到清洗后的流水表
// 流程: 解析 → 表头校验 → 映射 → 清洗（丢弃缺失关键值行）
// ==========================================

use crate::domain::transaction::TransactionRecord;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::TransactionFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{DataCleaner, FieldMapper, FileParser, RawTable};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 导入结果汇总
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub records: Vec<TransactionRecord>,
    pub total_rows: usize,
    pub dropped_rows: usize,
    pub drop_reasons: Vec<String>,
    pub elapsed_ms: u64,
}

// ==========================================
// TransactionImporter - 生产流水导入器
// ==========================================
pub struct TransactionImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
}

impl TransactionImporter {
    /// 创建导入器（自定义组件）
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
        }
    }

    /// 从文件导入（CSV / Excel 自动识别）
    #[instrument(skip(self, file_path), fields(batch_id))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportSummary> {
        let file_path = file_path.as_ref();
        info!(file_path = %file_path.display(), "开始导入生产流水");

        // === 步骤 1: 解析文件 ===
        let table = self.file_parser.parse_to_raw_table(file_path)?;
        self.import_table(table)
    }

    /// 从已解析的原始表导入
    pub fn import_table(&self, table: RawTable) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        // === 步骤 2: 表头校验（缺列致命）===
        self.field_mapper.check_headers(&table.headers)?;

        let total_rows = table.rows.len();
        debug!(total_rows, "文件解析完成");

        // === 步骤 3: 映射 + 清洗 ===
        let mut records = Vec::with_capacity(total_rows);
        let mut drop_reasons = Vec::new();
        for (idx, row) in table.rows.iter().enumerate() {
            // 行号从 2 开始（第 1 行为表头）
            let raw = self.field_mapper.map_to_raw_transaction(row, idx + 2);
            match self.data_cleaner.clean(raw) {
                Ok(record) => records.push(record),
                Err(reason) => drop_reasons.push(reason),
            }
        }

        let dropped_rows = drop_reasons.len();
        if dropped_rows > 0 {
            warn!(
                dropped_rows,
                first_reason = %drop_reasons[0],
                "部分行关键字段缺失，已丢弃"
            );
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            total_rows,
            imported = records.len(),
            dropped_rows,
            elapsed_ms,
            "生产流水导入完成"
        );

        Ok(ImportSummary {
            batch_id,
            records,
            total_rows,
            dropped_rows,
            drop_reasons,
            elapsed_ms,
        })
    }
}

impl Default for TransactionImporter {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(TransactionFieldMapper),
            Box::new(DataCleanerImpl),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::io::Write;
    use tempfile::Builder;

    const HEADER: &str = "ODPI_ST_Description,ODPI_PC_Description,ODPI_MC_Type,ODPI_EM_Key,Operator_FullName,ODPI_OC_Standard_Time,ODPI_Actual_Time,ODPI_Quantity,ODPI_Date,ODPI_ODP_Shift";

    #[test]
    fn test_import_drops_rows_with_missing_numbers() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "POLO,SIDE SEAM,OL,101,Asha,12,300,20,2024-03-01,A").unwrap();
        writeln!(file, "POLO,HEMMING,FL,102,Ravi,,300,20,2024-03-01,A").unwrap();
        writeln!(file, "POLO,HEMMING,FL,103,Nimal,8,n/a,20,2024-03-02,B").unwrap();

        let summary = TransactionImporter::default().import_file(file.path()).unwrap();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.dropped_rows, 2);
        assert_eq!(summary.records[0].operator_name, "Asha");
        assert!(!summary.batch_id.is_empty());
    }

    #[test]
    fn test_import_missing_required_column_is_fatal() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "ODPI_ST_Description,ODPI_PC_Description,ODPI_EM_Key").unwrap();
        writeln!(file, "POLO,SIDE SEAM,101").unwrap();

        let result = TransactionImporter::default().import_file(file.path());
        assert!(matches!(result, Err(ImportError::MissingColumn { .. })));
    }
}
