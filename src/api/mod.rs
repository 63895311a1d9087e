// ==========================================
// 操作员分配系统 - API 层
// ==========================================
// 职责: 面向调用方（CLI / 嵌入方）的分析会话接口
// ==========================================

pub mod analysis_api;
pub mod error;

pub use analysis_api::{AnalysisApi, AnalysisReport, AnalysisRequest};
pub use error::{ApiError, ApiResult};
