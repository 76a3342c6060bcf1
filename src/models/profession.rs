//! 职业目录模型

use serde::{Deserialize, Serialize};

/// 职业（分析目标）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    pub id: i64,
    pub name: String,
}

/// /all_professions 接口响应
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionListResponse {
    pub data: Vec<Profession>,
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id={})", self.name, self.id)
    }
}
