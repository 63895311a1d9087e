// ==========================================
// 操作员分配系统 - 统计表加载器
// ==========================================
// 职责: 读取外部产出的分类统计表 (StatRecord CSV)
// 红线: 必需列（效率/频次/权重/经验类别）缺失 = 致命前置条件错误
// ==========================================

use crate::domain::stats::{StatRecord, REQUIRED_STAT_COLUMNS};
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// 校验统计表表头
pub fn check_stat_headers(headers: &[String]) -> ImportResult<()> {
    for (canonical, alias) in REQUIRED_STAT_COLUMNS {
        let present = headers
            .iter()
            .any(|h| h.as_str() == *canonical || h.as_str() == *alias);
        if !present {
            return Err(ImportError::MissingColumn {
                column: canonical.to_string(),
                accepted: format!("{} / {}", canonical, alias),
            });
        }
    }
    Ok(())
}

/// 从 CSV 文件加载 StatRecord
pub fn load_stat_records<P: AsRef<Path>>(path: P) -> ImportResult<Vec<StatRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    let records = read_stat_records(file)?;
    info!(path = %path.display(), count = records.len(), "统计表加载完成");
    Ok(records)
}

/// 从任意 Reader 加载 StatRecord
pub fn read_stat_records<R: Read>(reader: R) -> ImportResult<Vec<StatRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    check_stat_headers(&headers)?;
    reader.set_headers(csv::StringRecord::from(headers));

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<StatRecord>().enumerate() {
        let record = result.map_err(|e| ImportError::StatRecordError {
            row: idx + 2,
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}
