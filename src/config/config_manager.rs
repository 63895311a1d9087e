// ==========================================
// 操作员分配系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、查询
// 存储: JSON 文件（显式路径 > 环境变量 > 用户配置目录 > 默认值）
// ==========================================

use crate::config::allocation_config::{AllocationConfig, WeightageCoefficients};
use crate::config::allocation_config_trait::AllocationConfigReader;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "OPERATOR_ALLOCATION_CONFIG";

/// 用户配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "operator-allocation";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AllocationConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 从已有配置创建（不读文件）
    pub fn from_config(config: AllocationConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 从指定 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: AllocationConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        validate(&config)?;

        info!(path = %path.display(), "已加载分配配置");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按优先级解析配置来源
    ///
    /// 1) 显式路径（必须存在）
    /// 2) 环境变量 OPERATOR_ALLOCATION_CONFIG（必须存在）
    /// 3) 用户配置目录下的 operator-allocation/config.json（存在才读）
    /// 4) 默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                return Self::from_file(env_path);
            }
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        debug!("未找到配置文件，使用默认配置");
        Self::from_config(AllocationConfig::default())
    }

    /// 默认配置文件路径: <config_dir>/operator-allocation/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 当前生效配置
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 配置快照（JSON），用于随报表一并输出
    pub fn get_config_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config: AllocationConfig::default(),
            source: None,
        }
    }
}

impl AllocationConfigReader for ConfigManager {
    fn headcount_bounds(&self) -> (usize, usize) {
        self.config.headcount_bounds()
    }

    fn quality_check_labels(&self) -> &[String] {
        self.config.quality_check_labels()
    }

    fn efficiency_bounds(&self) -> (f64, f64) {
        self.config.efficiency_bounds()
    }

    fn experience_days_threshold(&self) -> u32 {
        self.config.experience_days_threshold()
    }

    fn shift_duration_secs(&self) -> f64 {
        self.config.shift_duration_secs()
    }

    fn bottleneck_count(&self) -> usize {
        self.config.bottleneck_count()
    }

    fn weightage_coefficients(&self) -> &WeightageCoefficients {
        self.config.weightage_coefficients()
    }
}

// ==========================================
// 校验
// ==========================================

fn validate(config: &AllocationConfig) -> Result<(), ConfigError> {
    if config.min_headcount == 0 {
        return Err(ConfigError::InvalidValue {
            key: "min_headcount".to_string(),
            message: "必须 >= 1".to_string(),
        });
    }
    if config.max_headcount < config.min_headcount {
        return Err(ConfigError::InvalidValue {
            key: "max_headcount".to_string(),
            message: format!(
                "必须 >= min_headcount ({} < {})",
                config.max_headcount, config.min_headcount
            ),
        });
    }
    if !(config.efficiency_min.is_finite()
        && config.efficiency_max.is_finite()
        && config.efficiency_min <= config.efficiency_max)
    {
        return Err(ConfigError::InvalidValue {
            key: "efficiency_min/efficiency_max".to_string(),
            message: format!(
                "区间非法: [{}, {}]",
                config.efficiency_min, config.efficiency_max
            ),
        });
    }
    if !(config.shift_duration_secs.is_finite() && config.shift_duration_secs > 0.0) {
        return Err(ConfigError::InvalidValue {
            key: "shift_duration_secs".to_string(),
            message: format!("必须 > 0，实际 {}", config.shift_duration_secs),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"max_headcount": 3, "experience_days_threshold": 10}}"#).unwrap();

        let manager = ConfigManager::from_file(file.path()).unwrap();
        assert_eq!(manager.headcount_bounds(), (1, 3));
        assert_eq!(manager.experience_days_threshold(), 10);
        assert_eq!(manager.source(), Some(file.path()));
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/allocation.json")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_headcount_rejected() {
        let config = AllocationConfig {
            min_headcount: 5,
            max_headcount: 2,
            ..AllocationConfig::default()
        };
        assert!(matches!(
            ConfigManager::from_config(config),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        assert!(matches!(
            ConfigManager::from_file(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
