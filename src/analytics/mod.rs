// ==========================================
// 操作员分配系统 - 统计层
// ==========================================
// 职责: 从清洗后的流水表生成分配所需的统计表及只读报表
// 红线: 不做分配决策
// ==========================================

pub mod aggregation;
pub mod categorization;
pub mod efficiency;
pub mod pipeline;
pub mod shift;

pub use aggregation::aggregate_operator_data_grouped;
pub use categorization::{calculate_operator_weightage, categorize_with_grouped_averages};
pub use efficiency::{Bottleneck, EfficiencyCalculator};
pub use pipeline::{StatisticsOutput, StatisticsPipeline};
pub use shift::{
    HistoricalAverage, OperationsPerShift, OperatorAverageTime, ShiftOperationsCalculator,
};
