// ==========================================
// 操作员分配系统 - 命令行入口
// ==========================================
// 用法:
//   operator-allocation --input line1.csv --styles A,B
//   operator-allocation --input line1.xlsx --styles A --operators 101,102 --out-dir reports
// ==========================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use operator_allocation::api::{AnalysisApi, AnalysisRequest};
use operator_allocation::config::{ConfigManager, CONFIG_PATH_ENV};
use operator_allocation::logging;
use operator_allocation::report::{render_distribution_tree, render_efficiency_table};

/// Allocate operators to style operations from historical production records.
#[derive(Parser)]
#[command(name = "operator-allocation", version)]
struct Args {
    /// Transaction file (.csv, .xlsx or .xls).
    #[arg(long)]
    input: PathBuf,

    /// Styles to allocate, in processing order.
    #[arg(long, value_delimiter = ',', required = true)]
    styles: Vec<String>,

    /// Operator pool, in allocation order. Defaults to every operator seen in the selected styles.
    #[arg(long, value_delimiter = ',')]
    operators: Option<Vec<String>>,

    /// Allocation config (JSON).
    #[arg(long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Precomputed categorized statistics (CSV) used instead of recomputing them.
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Directory for CSV reports.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    tracing::info!("{} v{}", operator_allocation::APP_NAME, operator_allocation::VERSION);

    let config = ConfigManager::load(args.config.as_deref()).context("加载配置失败")?;
    if let Some(source) = config.source() {
        tracing::info!(path = %source.display(), "使用配置文件");
    }

    let api = AnalysisApi::new(config);
    let request = AnalysisRequest {
        input: args.input,
        styles: args.styles,
        operators: args.operators,
        stats_file: args.stats,
    };

    let report = api
        .run(&request)
        .with_context(|| format!("分析失败: {}", request.input.display()))?;

    println!("Operator Distribution");
    println!("{}", render_distribution_tree(&report.allocation.plan, &report.operators));
    println!("Achieved Efficiency");
    println!(
        "{}",
        render_efficiency_table(&report.allocation.achieved_efficiency, report.target_efficiency)
    );

    for quota in report.allocation.starved_styles() {
        println!(
            "Quota shortfall: {} received {} of {} operators",
            quota.style_id,
            quota.operators.len(),
            quota.quota
        );
    }

    let pool: Vec<String> = report.operators.iter().map(|o| o.operator_id.clone()).collect();
    let unplaced = report.allocation.unplaced_operators(&pool);
    if !unplaced.is_empty() {
        println!("Unplaced operators: {}", unplaced.join(", "));
    }

    let unfilled = report.allocation.unfilled_operations();
    if !unfilled.is_empty() {
        println!("Unfilled operations:");
        for (style_id, operation_id) in &unfilled {
            println!("  {} / {}", style_id, operation_id);
        }
    }

    if let Some(dir) = args.out_dir {
        let files = api
            .export(&report, &dir)
            .with_context(|| format!("导出报表失败: {}", dir.display()))?;
        for file in files {
            println!("written: {}", file.display());
        }
    }

    Ok(())
}
