// ==========================================
// 操作员分配系统 - 分析 API
// ==========================================
// 职责: 一次分析会话的完整流程
// 流程: 导入 → 款式过滤 → 操作员确认 → 统计（效率区间过滤）→ 班次分析 → 分配 → 评估
// 红线: 空选择在此层报错，引擎本身对空输入返回空方案
// ==========================================

use crate::analytics::{
    OperationsPerShift, OperatorAverageTime, ShiftOperationsCalculator, StatisticsOutput,
    StatisticsPipeline,
};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::stats::StatRecord;
use crate::domain::transaction::{distinct_operators, Operator, TransactionRecord};
use crate::engine::{AllocationOrchestrator, AllocationResult};
use crate::importer::{load_stat_records, TransactionImporter};
use crate::report::{
    write_allocation_report, write_bottlenecks, write_csv_file, write_efficiency_report,
    write_operations_per_shift, write_operator_times, write_stat_records, ALLOCATION_REPORT_FILE,
    BOTTLENECKS_FILE, CATEGORIZED_DATA_FILE, EFFICIENCY_REPORT_FILE, OPERATIONS_DATA_FILE,
    OPERATOR_TIMES_FILE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// 分析请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// 流水文件（.csv / .xlsx / .xls）
    pub input: PathBuf,
    /// 款式处理顺序
    pub styles: Vec<String>,
    /// 操作员池；None 表示所选款式中出现过的全部操作员（首次出现顺序）
    pub operators: Option<Vec<String>>,
    /// 预先计算好的统计表；None 表示从流水重新计算
    pub stats_file: Option<PathBuf>,
}

/// 分析结果
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub batch_id: String,
    pub total_rows: usize,
    pub dropped_rows: usize,
    /// 限定到所选款式且效率在有效区间内的流水（分配核心的输入）
    pub transactions: Vec<TransactionRecord>,
    /// 操作员池（按分配顺序）
    pub operators: Vec<Operator>,
    pub statistics: StatisticsOutput,
    pub operations_per_shift: Vec<OperationsPerShift>,
    pub operator_times: Vec<OperatorAverageTime>,
    pub allocation: AllocationResult,
    pub target_efficiency: f64,
}

// ==========================================
// AnalysisApi
// ==========================================
pub struct AnalysisApi {
    config: ConfigManager,
    importer: TransactionImporter,
}

impl AnalysisApi {
    pub fn new(config: ConfigManager) -> Self {
        Self {
            config,
            importer: TransactionImporter::default(),
        }
    }

    pub fn with_importer(config: ConfigManager, importer: TransactionImporter) -> Self {
        Self { config, importer }
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// 从文件执行完整分析
    #[instrument(skip(self, request), fields(input = %request.input.display()))]
    pub fn run(&self, request: &AnalysisRequest) -> ApiResult<AnalysisReport> {
        let summary = self.importer.import_file(&request.input)?;
        let stats = match &request.stats_file {
            Some(path) => Some(load_stat_records(path)?),
            None => None,
        };

        let mut report = self.run_records(
            summary.records,
            &request.styles,
            request.operators.as_deref(),
            stats,
        )?;
        report.batch_id = summary.batch_id;
        report.total_rows = summary.total_rows;
        report.dropped_rows = summary.dropped_rows;
        Ok(report)
    }

    /// 对已加载的流水执行分析
    pub fn run_records(
        &self,
        records: Vec<TransactionRecord>,
        styles: &[String],
        operators: Option<&[String]>,
        precomputed_stats: Option<Vec<StatRecord>>,
    ) -> ApiResult<AnalysisReport> {
        let total_rows = records.len();

        // ===== 款式过滤 =====
        if styles.is_empty() {
            return Err(ApiError::InvalidInput("未选择款式".to_string()));
        }
        let selected_styles: HashSet<&str> = styles.iter().map(|s| s.as_str()).collect();
        let transactions: Vec<TransactionRecord> = records
            .into_iter()
            .filter(|r| selected_styles.contains(r.style_id.as_str()))
            .collect();
        if transactions.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "所选款式无数据: {}",
                styles.join(", ")
            )));
        }

        // ===== 操作员池 =====
        let pool = self.resolve_operators(&transactions, operators)?;
        let operator_ids: Vec<String> = pool.iter().map(|o| o.operator_id.clone()).collect();

        // ===== 统计 =====
        let pipeline = StatisticsPipeline::from_config(&self.config);
        let statistics = match precomputed_stats {
            Some(stats) => {
                info!(records = stats.len(), "使用预计算统计表");
                pipeline.run_with_stats(&transactions, stats)
            }
            None => pipeline.run(&transactions),
        };

        // 班次分析与分配只使用效率在有效区间内的流水
        let transactions = statistics.in_band_transactions();
        if transactions.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "所选款式无有效效率记录: {}",
                styles.join(", ")
            )));
        }

        // ===== 班次分析 =====
        let shift = ShiftOperationsCalculator::from_config(&self.config);
        let historical = shift.calculate_historical_average_time(&transactions);
        let operations_per_shift = shift.operations_per_shift(&historical);
        let operator_times = shift.calculate_operator_avg_time(&transactions, &operator_ids);

        // ===== 分配 + 评估 =====
        let allocation = AllocationOrchestrator::new(&self.config).allocate(
            &transactions,
            &statistics.stat_records,
            &operator_ids,
            styles,
        )?;

        info!(
            transactions = transactions.len(),
            operators = pool.len(),
            assigned = allocation.plan.assigned_count(),
            "分析完成"
        );

        Ok(AnalysisReport {
            batch_id: String::new(),
            total_rows,
            dropped_rows: 0,
            transactions,
            operators: pool,
            statistics,
            operations_per_shift,
            operator_times,
            allocation,
            target_efficiency: self.config.config().target_efficiency,
        })
    }

    /// 确认操作员池
    ///
    /// 未指定时取所选款式中的全部操作员；指定时保持给定顺序，
    /// 姓名从流水中补全，流水中不存在的 ID 保留但记录告警
    fn resolve_operators(
        &self,
        transactions: &[TransactionRecord],
        operators: Option<&[String]>,
    ) -> ApiResult<Vec<Operator>> {
        let known = distinct_operators(transactions);
        let pool = match operators {
            None => known,
            Some(ids) => {
                let mut seen = HashSet::new();
                ids.iter()
                    .map(|id| id.trim())
                    .filter(|id| !id.is_empty() && seen.insert(id.to_string()))
                    .map(|id| match known.iter().find(|o| o.operator_id == id) {
                        Some(op) => op.clone(),
                        None => {
                            warn!(operator_id = %id, "操作员在所选款式中无流水记录");
                            Operator::new(id, id)
                        }
                    })
                    .collect()
            }
        };

        if pool.is_empty() {
            return Err(ApiError::InvalidInput("未选择操作员".to_string()));
        }
        Ok(pool)
    }

    /// 导出全部 CSV 报表
    #[instrument(skip(self, report), fields(dir = %dir.display()))]
    pub fn export(&self, report: &AnalysisReport, dir: &Path) -> ApiResult<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| ApiError::ExportError(e.to_string()))?;

        let path = |name: &str| dir.join(name);
        let written = vec![
            path(ALLOCATION_REPORT_FILE),
            path(EFFICIENCY_REPORT_FILE),
            path(CATEGORIZED_DATA_FILE),
            path(OPERATIONS_DATA_FILE),
            path(OPERATOR_TIMES_FILE),
            path(BOTTLENECKS_FILE),
        ];

        write_csv_file(&written[0], |f| {
            write_allocation_report(f, &report.allocation.plan, &report.operators)
        })?;
        write_csv_file(&written[1], |f| {
            write_efficiency_report(f, &report.allocation.achieved_efficiency)
        })?;
        write_csv_file(&written[2], |f| {
            write_stat_records(f, &report.statistics.stat_records)
        })?;
        write_csv_file(&written[3], |f| {
            write_operations_per_shift(f, &report.operations_per_shift)
        })?;
        write_csv_file(&written[4], |f| write_operator_times(f, &report.operator_times))?;
        write_csv_file(&written[5], |f| {
            write_bottlenecks(f, &report.statistics.bottlenecks)
        })?;

        info!(files = written.len(), "报表导出完成");
        Ok(written)
    }
}

impl Default for AnalysisApi {
    fn default() -> Self {
        Self::new(ConfigManager::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(style: &str, op: &str, id: &str, name: &str, std: f64, actual: f64) -> TransactionRecord {
        TransactionRecord {
            style_id: style.to_string(),
            operation_id: op.to_string(),
            machine_type: "SNLS".to_string(),
            operator_id: id.to_string(),
            operator_name: name.to_string(),
            standard_time: std,
            actual_time: actual,
            quantity: 10.0,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            shift: None,
        }
    }

    fn records() -> Vec<TransactionRecord> {
        vec![
            tx("S", "X", "1", "Alice", 10.0, 100.0),
            tx("S", "Y", "2", "Bob", 5.0, 50.0),
            tx("T", "Z", "3", "Cara", 8.0, 80.0),
        ]
    }

    #[test]
    fn test_empty_style_selection_is_invalid() {
        let api = AnalysisApi::default();
        let err = api.run_records(records(), &[], None, None).err().unwrap();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_style_without_data_is_invalid() {
        let api = AnalysisApi::default();
        let err = api
            .run_records(records(), &["NOPE".to_string()], None, None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn test_empty_operator_selection_is_invalid() {
        let api = AnalysisApi::default();
        let err = api
            .run_records(records(), &["S".to_string()], Some(Vec::new().as_slice()), None)
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_default_pool_is_operators_of_selected_styles() {
        let api = AnalysisApi::default();
        let report = api.run_records(records(), &["S".to_string()], None, None).unwrap();

        let ids: Vec<&str> = report.operators.iter().map(|o| o.operator_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.allocation.plan.operators("S", "X").unwrap(), ["1".to_string()]);
        assert_eq!(report.allocation.plan.operators("S", "Y").unwrap(), ["2".to_string()]);
        assert_eq!(report.allocation.achieved_efficiency["S"], 100.0);
    }

    #[test]
    fn test_unknown_operator_kept_with_id_as_name() {
        let api = AnalysisApi::default();
        let ops = vec!["2".to_string(), "99".to_string(), "2".to_string()];
        let report = api
            .run_records(records(), &["S".to_string()], Some(ops.as_slice()), None)
            .unwrap();
        assert_eq!(report.operators.len(), 2);
        assert_eq!(report.operators[1].operator_name, "99");
    }

    #[test]
    fn test_out_of_band_operation_not_planned() {
        // Y 唯一记录效率 10000%，超出有效区间
        let records = vec![
            tx("S", "X", "1", "Alice", 10.0, 100.0),
            tx("S", "X", "2", "Bob", 10.0, 100.0),
            tx("S", "Y", "3", "Cara", 10.0, 1.0),
        ];
        let api = AnalysisApi::default();
        let report = api.run_records(records, &["S".to_string()], None, None).unwrap();

        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.allocation.quotas["S"].operations_count, 1);
        let style = report.allocation.plan.style("S").unwrap();
        assert_eq!(style.len(), 1);
        assert_eq!(
            report.allocation.plan.operators("S", "X").unwrap(),
            ["1".to_string(), "2".to_string()]
        );
        assert!(report.allocation.plan.operators("S", "Y").is_none());
        assert!(report.allocation.gap_fills["S"].is_empty());
    }

    #[test]
    fn test_out_of_band_applies_with_precomputed_stats() {
        let records = vec![
            tx("S", "X", "1", "Alice", 10.0, 100.0),
            tx("S", "Y", "2", "Bob", 10.0, 1.0),
        ];
        let mut stats = StatisticsPipeline::default().run(&records).stat_records;
        // 外部统计表即便包含 Y 也不影响核心输入
        let mut y = stats[0].clone();
        y.operation_id = "Y".to_string();
        y.operator_id = "2".to_string();
        stats.push(y);

        let report = AnalysisApi::default()
            .run_records(records, &["S".to_string()], None, Some(stats))
            .unwrap();
        assert_eq!(report.allocation.quotas["S"].operations_count, 1);
        assert!(report.allocation.plan.operators("S", "Y").is_none());
        assert_eq!(report.statistics.stat_records.len(), 2);
    }

    #[test]
    fn test_all_rows_out_of_band_is_invalid() {
        let records = vec![tx("S", "X", "1", "Alice", 10.0, 1.0)];
        let err = AnalysisApi::default()
            .run_records(records, &["S".to_string()], None, None)
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
