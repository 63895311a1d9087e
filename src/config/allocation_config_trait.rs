// ==========================================
// 操作员分配系统 - 分配配置读取 Trait
// ==========================================
// 职责: 定义引擎与统计层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::allocation_config::{AllocationConfig, WeightageCoefficients};

// ==========================================
// AllocationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 JSON 文件加载）、AllocationConfig（测试直接传入）
pub trait AllocationConfigReader: Send + Sync {
    /// 单工序人数区间 (min, max)
    ///
    /// # 默认值
    /// - (1, 7)
    fn headcount_bounds(&self) -> (usize, usize);

    /// 质检类工序标签
    ///
    /// # 默认值
    /// - ["QUALITY CHECK", "QUALITY CHECKING"]
    fn quality_check_labels(&self) -> &[String];

    /// 有效效率区间 (min, max)，单位 %
    ///
    /// # 默认值
    /// - (5.0, 200.0)
    fn efficiency_bounds(&self) -> (f64, f64);

    /// 熟练工出勤天数阈值
    fn experience_days_threshold(&self) -> u32;

    /// 班次时长（秒）
    fn shift_duration_secs(&self) -> f64;

    /// 每款式瓶颈工序数
    fn bottleneck_count(&self) -> usize;

    /// 权重系数
    fn weightage_coefficients(&self) -> &WeightageCoefficients;

    /// 判断工序是否为质检类（去空白后大小写不敏感）
    fn is_quality_check(&self, operation_id: &str) -> bool {
        let normalized = operation_id.trim();
        self.quality_check_labels()
            .iter()
            .any(|label| label.trim().eq_ignore_ascii_case(normalized))
    }
}

impl AllocationConfigReader for AllocationConfig {
    fn headcount_bounds(&self) -> (usize, usize) {
        (self.min_headcount, self.max_headcount)
    }

    fn quality_check_labels(&self) -> &[String] {
        &self.quality_check_labels
    }

    fn efficiency_bounds(&self) -> (f64, f64) {
        (self.efficiency_min, self.efficiency_max)
    }

    fn experience_days_threshold(&self) -> u32 {
        self.experience_days_threshold
    }

    fn shift_duration_secs(&self) -> f64 {
        self.shift_duration_secs
    }

    fn bottleneck_count(&self) -> usize {
        self.bottleneck_count
    }

    fn weightage_coefficients(&self) -> &WeightageCoefficients {
        &self.weightage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quality_check_case_insensitive() {
        let config = AllocationConfig::default();
        assert!(config.is_quality_check("Quality Check"));
        assert!(config.is_quality_check("  quality checking "));
        assert!(!config.is_quality_check("QUALITY CHECKER"));
        assert!(!config.is_quality_check("SIDE SEAM"));
    }
}
