// ==========================================
// 操作员分配系统 - 导入层
// ==========================================
// 职责: 外部数据导入,生成清洗后的流水表 / 统计表
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod stat_loader;
pub mod transaction_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{TransactionField, TransactionFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use stat_loader::{check_stat_headers, load_stat_records, read_stat_records};
pub use transaction_importer::{ImportSummary, TransactionImporter};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FieldMapper, FileParser, RawTable, RawTransactionRecord};
