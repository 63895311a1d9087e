// ==========================================
// 操作员分配系统 - 已分配集合
// ==========================================
// 作用域: 单次分配调用；跨款式、跨工序共享
// 不变量: 操作员一旦进入即视为已占用；回补/再分配只移动，不重复
// ==========================================

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct AssignedSet {
    members: HashSet<String>,
}

impl AssignedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, operator_id: &str) -> bool {
        self.members.contains(operator_id)
    }

    /// 返回是否为新加入
    pub fn insert(&mut self, operator_id: &str) -> bool {
        if self.members.contains(operator_id) {
            return false;
        }
        self.members.insert(operator_id.to_string())
    }

    pub fn extend<'a, I>(&mut self, operator_ids: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for id in operator_ids {
            self.insert(id);
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = AssignedSet::new();
        assert!(set.insert("1"));
        assert!(!set.insert("1"));
        set.extend(&["2".to_string(), "1".to_string()]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("2"));
    }
}
