// ==========================================
// 操作员分配系统 - 领域类型定义
// ==========================================
// 职责: 统计表中的分类枚举
// 序列化格式: 与导出报表列值一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 经验类别 (Experience Category)
// ==========================================
// 由出勤天数与阈值比较得出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceCategory {
    Experienced, // 熟练工
    Fresher,     // 新手
}

impl fmt::Display for ExperienceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceCategory::Experienced => write!(f, "Experienced"),
            ExperienceCategory::Fresher => write!(f, "Fresher"),
        }
    }
}

impl FromStr for ExperienceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "experienced" => Ok(ExperienceCategory::Experienced),
            "fresher" => Ok(ExperienceCategory::Fresher),
            other => Err(format!("未知经验类别: {}", other)),
        }
    }
}

// ==========================================
// 效率类别 (Efficiency Category)
// ==========================================
// 同款式同工序内与组均值/标准差比较
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfficiencyCategory {
    #[serde(rename = "High Performer")]
    HighPerformer, // 高于均值 + 1 个标准差
    #[serde(rename = "Above Average")]
    AboveAverage, // 高于均值
    Average, // 其余
}

impl fmt::Display for EfficiencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyCategory::HighPerformer => write!(f, "High Performer"),
            EfficiencyCategory::AboveAverage => write!(f, "Above Average"),
            EfficiencyCategory::Average => write!(f, "Average"),
        }
    }
}
