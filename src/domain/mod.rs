// ==========================================
// 操作员分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod plan;
pub mod stats;
pub mod transaction;
pub mod types;

// 重导出核心类型
pub use plan::{AllocationPlan, Assignment, StyleAllocation};
pub use stats::{OperatorAggregate, StatRecord, REQUIRED_STAT_COLUMNS};
pub use transaction::{
    distinct_operators, distinct_styles, EfficiencyRecord, Operator, TransactionRecord,
};
pub use types::{EfficiencyCategory, ExperienceCategory};
