// ==========================================
// 操作员分配系统 - 分配引擎层
// ==========================================
// 职责: 配额切分、工序排序、贪心分配、回补、再分配、效率评估
// 红线: 纯计算，不读文件、不做统计聚合、不跨调用保留状态
// ==========================================

pub mod assigned_set;
pub mod assignment;
pub mod error;
pub mod evaluator;
pub mod gap_filler;
pub mod orchestrator;
pub mod prioritizer;
pub mod quota;
pub mod redistributor;
pub mod stat_index;

// 重导出核心引擎
pub use assigned_set::AssignedSet;
pub use assignment::{rank_candidates, AssignmentEngine};
pub use error::{EngineError, EngineResult};
pub use evaluator::EfficiencyEvaluator;
pub use gap_filler::{GapFill, GapFiller};
pub use orchestrator::{AllocationOrchestrator, AllocationResult};
pub use prioritizer::{total_standard_time, OperationPrioritizer, PrioritizedOperation};
pub use quota::{QuotaAllocator, StyleQuota};
pub use redistributor::{RedistributionSummary, Redistributor, Transfer};
pub use stat_index::StatIndex;
