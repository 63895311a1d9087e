// ==========================================
// 操作员分配系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 数值转换 / 日期解析 / 缺失关键值丢弃
// 红线: 关键数值（标准工时、产量、实际用时）缺失或非法 → 丢弃该行
// ==========================================

use crate::domain::transaction::TransactionRecord;
use crate::importer::importer_trait::{DataCleaner as DataCleanerTrait, RawTransactionRecord};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 支持的日期格式
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%Y%m%d"];

/// 支持的日期时间格式（取日期部分）
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean(&self, raw: RawTransactionRecord) -> Result<TransactionRecord, String> {
        let row = raw.row_number;

        let style_id = required_text(raw.style_id, "style_id", row)?;
        let operation_id = required_text(raw.operation_id, "operation_id", row)?;
        let machine_type = required_text(raw.machine_type, "machine_type", row)?;
        let operator_id = self.clean_identifier(&required_text(raw.operator_id, "operator_id", row)?);

        let standard_time = self.parse_number(raw.standard_time.as_deref(), "standard_time", row)?;
        let quantity = self.parse_number(raw.quantity.as_deref(), "quantity", row)?;
        let actual_time = self.parse_number(raw.actual_time.as_deref(), "actual_time", row)?;

        let date_raw = required_text(raw.date, "date", row)?;
        let date = self
            .parse_date(&date_raw)
            .ok_or_else(|| format!("行 {}: 日期无法解析: {}", row, date_raw))?;

        // 姓名缺失时以工号代替
        let operator_name = raw
            .operator_name
            .map(|n| self.clean_text(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| operator_id.clone());

        Ok(TransactionRecord {
            style_id,
            operation_id,
            machine_type,
            operator_id,
            operator_name,
            standard_time,
            actual_time,
            quantity,
            date,
            shift: raw.shift.map(|s| self.clean_text(&s)).filter(|s| !s.is_empty()),
        })
    }
}

impl DataCleaner {
    /// TRIM
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 工号标准化: Excel 数值单元格 "101.0" → "101"
    pub fn clean_identifier(&self, value: &str) -> String {
        let trimmed = value.trim();
        match trimmed.strip_suffix(".0") {
            Some(int_part) if !int_part.is_empty() && int_part.chars().all(|c| c.is_ascii_digit()) => {
                int_part.to_string()
            }
            _ => trimmed.to_string(),
        }
    }

    /// 数值转换（缺失/非数字/非有限值 → 错误）
    pub fn parse_number(&self, value: Option<&str>, field: &str, row: usize) -> Result<f64, String> {
        let raw = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("行 {}: {} 缺失", row, field))?;

        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(format!("行 {}: {} 无法解析为数值: {}", row, field, raw)),
        }
    }

    /// 日期解析（多格式 + 日期时间 + Excel 序列号）
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();

        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
                return Some(d);
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
                return Some(dt.date());
            }
        }
        // 形如 "2024-03-01 08:00" 之类: 取前 10 位再试
        if value.len() > 10 && value.is_char_boundary(10) {
            if let Ok(d) = NaiveDate::parse_from_str(&value[..10], "%Y-%m-%d") {
                return Some(d);
            }
        }

        // Excel 序列号（1900 日期系统，基准 1899-12-30）
        if let Ok(serial) = value.parse::<f64>() {
            if serial.is_finite() && (1.0..=2_958_465.0).contains(&serial) {
                let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
                return base.checked_add_signed(Duration::days(serial.trunc() as i64));
            }
        }
        None
    }
}

fn required_text(value: Option<String>, field: &str, row: usize) -> Result<String, String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("行 {}: {} 缺失", row, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawTransactionRecord {
        RawTransactionRecord {
            style_id: Some(" POLO ".to_string()),
            operation_id: Some("SIDE SEAM".to_string()),
            machine_type: Some("OL".to_string()),
            operator_id: Some("101.0".to_string()),
            operator_name: None,
            standard_time: Some("12.5".to_string()),
            actual_time: Some("300".to_string()),
            quantity: Some("20".to_string()),
            date: Some("2024-03-01".to_string()),
            shift: Some(" A ".to_string()),
            row_number: 3,
        }
    }

    #[test]
    fn test_clean_basic_row() {
        let record = DataCleaner.clean(raw()).unwrap();
        assert_eq!(record.style_id, "POLO");
        assert_eq!(record.operator_id, "101");
        assert_eq!(record.operator_name, "101", "姓名缺失时以工号代替");
        assert_eq!(record.standard_time, 12.5);
        assert_eq!(record.shift.as_deref(), Some("A"));
    }

    #[test]
    fn test_clean_drops_non_numeric_quantity() {
        let mut r = raw();
        r.quantity = Some("abc".to_string());
        let err = DataCleaner.clean(r).unwrap_err();
        assert!(err.contains("quantity"));
    }

    #[test]
    fn test_clean_drops_missing_actual_time() {
        let mut r = raw();
        r.actual_time = None;
        assert!(DataCleaner.clean(r).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(cleaner.parse_date("2024-03-01"), Some(expected));
        assert_eq!(cleaner.parse_date("2024/03/01"), Some(expected));
        assert_eq!(cleaner.parse_date("20240301"), Some(expected));
        assert_eq!(cleaner.parse_date("2024-03-01 07:30:00"), Some(expected));
        assert_eq!(cleaner.parse_date("45352"), Some(expected));
        assert_eq!(cleaner.parse_date("yesterday"), None);
    }

    #[test]
    fn test_clean_identifier_keeps_text_ids() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_identifier("EMP-7"), "EMP-7");
        assert_eq!(cleaner.clean_identifier("12.05"), "12.05");
        assert_eq!(cleaner.clean_identifier("77.0"), "77");
    }
}
