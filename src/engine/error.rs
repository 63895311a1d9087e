// ==========================================
// 操作员分配系统 - 分配引擎错误类型
// ==========================================
// 致命: 统计表/流水表字段非法、主键重复
// 非致命（不走错误通道）: 查找未命中、工序无人可派
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("统计记录字段非法 (行 {row}, 字段 {field}): {message}")]
    InvalidStatRecord {
        row: usize,
        field: &'static str,
        message: String,
    },

    #[error("统计记录主键重复 (行 {row}): ({style_id}, {operation_id}, {operator_id})")]
    DuplicateStatRecord {
        row: usize,
        style_id: String,
        operation_id: String,
        operator_id: String,
    },

    #[error("流水记录标准工时非法 ({style_id}, {operation_id}): {value}")]
    InvalidStandardTime {
        style_id: String,
        operation_id: String,
        value: f64,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
