// ==========================================
// 操作员分配系统 - 报表层
// ==========================================
// 职责: 分配结果与统计表的 CSV 导出、文本展示
// 红线: 只读，不修改分配方案
// ==========================================

pub mod csv_export;
pub mod error;
pub mod tree;

pub use csv_export::{
    allocation_rows, efficiency_rows, round2, write_allocation_report, write_bottlenecks,
    write_csv_file, write_efficiency_report, write_operations_per_shift, write_operator_times,
    write_stat_records, AllocationRow, EfficiencyRow, ALLOCATION_REPORT_FILE, BOTTLENECKS_FILE,
    CATEGORIZED_DATA_FILE, EFFICIENCY_REPORT_FILE, OPERATIONS_DATA_FILE, OPERATOR_TIMES_FILE,
};
pub use error::{ReportError, ReportResult};
pub use tree::{render_distribution_tree, render_efficiency_table};
