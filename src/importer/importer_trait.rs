// ==========================================
// 操作员分配系统 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解析 → 映射 → 清洗
// ==========================================

use crate::domain::transaction::TransactionRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 解析后的原始表（表头 + 行）
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

/// 字段映射后的中间结构（全部为原始字符串）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTransactionRecord {
    pub style_id: Option<String>,
    pub operation_id: Option<String>,
    pub machine_type: Option<String>,
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    pub standard_time: Option<String>,
    pub actual_time: Option<String>,
    pub quantity: Option<String>,
    pub date: Option<String>,
    pub shift: Option<String>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表（表头 + HashMap<列名, 值> 行）
    ///
    /// # 返回
    /// - Ok(RawTable): 去除完全空白行后的原始表
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 实现者: TransactionFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 校验表头是否包含所有必需列
    ///
    /// # 返回
    /// - Err(ImportError::MissingColumn): 缺失任一必需列（致命）
    fn check_headers(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行映射为 RawTransactionRecord
    fn map_to_raw_transaction(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawTransactionRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗并转换为 TransactionRecord
    ///
    /// # 返回
    /// - Ok(record): 清洗成功
    /// - Err(reason): 关键字段缺失/无法转换，调用方丢弃该行并计数
    fn clean(&self, raw: RawTransactionRecord) -> Result<TransactionRecord, String>;
}
