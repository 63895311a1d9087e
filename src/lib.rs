// ==========================================
// 操作员分配系统 - 核心库
// ==========================================
// 系统定位: 基于历史效率的工序人员分配与效率评估
// 分层: 导入 → 统计 → 分配引擎 → 报表，API 层串联
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 分配参数
pub mod config;

// 导入层 - 外部数据
pub mod importer;

// 统计层 - 效率/聚合/分类/权重
pub mod analytics;

// 引擎层 - 分配核心
pub mod engine;

// 报表层 - 导出与展示
pub mod report;

// API 层 - 分析会话
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EfficiencyCategory, ExperienceCategory};

// 领域实体
pub use domain::{AllocationPlan, Operator, StatRecord, TransactionRecord};

// 引擎
pub use engine::{
    AllocationOrchestrator, AllocationResult, AssignmentEngine, EfficiencyEvaluator, EngineError,
    GapFiller, OperationPrioritizer, QuotaAllocator, Redistributor,
};

// API
pub use api::{AnalysisApi, AnalysisReport, AnalysisRequest, ApiError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "操作员分配系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
