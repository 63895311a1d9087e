// ==========================================
// 操作员分配系统 - 配置层
// ==========================================
// 职责: 分配参数加载与读取
// 存储: JSON 文件
// ==========================================

pub mod allocation_config;
pub mod allocation_config_trait;
pub mod config_manager;

// 重导出核心配置
pub use allocation_config::{AllocationConfig, WeightageCoefficients};
pub use allocation_config_trait::AllocationConfigReader;
pub use config_manager::{ConfigError, ConfigManager, CONFIG_PATH_ENV};
