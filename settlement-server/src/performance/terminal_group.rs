//! Terminal Linkage Resolver
//!
//! A terminal linked to a hub ranks together with the hub and every other
//! terminal linked to that hub. Links are followed one hop only.

use std::collections::{BTreeSet, HashMap};

use crate::db::{SettlementStore, StoreResult};

/// Sorted set of terminal ids forming one ranking cohort
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalGroup(BTreeSet<i64>);

impl TerminalGroup {
    pub fn single(terminal_id: i64) -> Self {
        Self(BTreeSet::from([terminal_id]))
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    /// JSON array of the ids, e.g. `[1,4,9]`
    pub fn keys(&self) -> String {
        let ids = self.ids();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".into())
    }
}

/// Resolve the cohort terminals of `terminal_id`
///
/// Unknown or unlinked terminals resolve to themselves.
pub async fn resolve_group(
    store: &dyn SettlementStore,
    terminal_id: i64,
) -> StoreResult<TerminalGroup> {
    let Some(terminal) = store.find_terminal(terminal_id).await? else {
        tracing::debug!(terminal_id, "Terminal not found, ranking alone");
        return Ok(TerminalGroup::single(terminal_id));
    };

    let Some(hub_id) = terminal.linked_terminal_id else {
        return Ok(TerminalGroup::single(terminal_id));
    };

    let siblings = store.find_terminals_linked_to(hub_id).await?;
    let mut group = TerminalGroup::single(terminal_id);
    group.0.insert(hub_id);
    group.0.extend(siblings.iter().map(|t| t.id));
    Ok(group)
}

/// Per-run memo of resolved groups
#[derive(Debug, Default)]
pub struct GroupResolver {
    resolved: HashMap<i64, TerminalGroup>,
}

impl GroupResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn resolve(
        &mut self,
        store: &dyn SettlementStore,
        terminal_id: i64,
    ) -> StoreResult<TerminalGroup> {
        if let Some(group) = self.resolved.get(&terminal_id) {
            return Ok(group.clone());
        }
        let group = resolve_group(store, terminal_id).await?;
        self.resolved.insert(terminal_id, group.clone());
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use shared::models::Terminal;

    fn terminal(id: i64, linked: Option<i64>) -> Terminal {
        Terminal {
            id,
            name: format!("T{id}"),
            organization_id: 1,
            linked_terminal_id: linked,
        }
    }

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_terminal(terminal(1, None));
        store.insert_terminal(terminal(2, Some(1)));
        store.insert_terminal(terminal(3, Some(1)));
        store.insert_terminal(terminal(4, None));
        store
    }

    #[tokio::test]
    async fn test_unlinked_terminal_is_singleton() {
        let store = store();
        let group = resolve_group(&store, 4).await.unwrap();
        assert_eq!(group.ids(), vec![4]);
    }

    #[tokio::test]
    async fn test_terminals_sharing_a_hub_share_a_group() {
        let store = store();
        let a = resolve_group(&store, 2).await.unwrap();
        let b = resolve_group(&store, 3).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.ids(), vec![1, 2, 3]);
        assert_eq!(a.keys(), "[1,2,3]");
    }

    #[tokio::test]
    async fn test_unknown_terminal_is_singleton() {
        let store = store();
        let group = resolve_group(&store, 99).await.unwrap();
        assert_eq!(group, TerminalGroup::single(99));
    }

    #[tokio::test]
    async fn test_links_are_one_hop() {
        let store = store();
        store.insert_terminal(terminal(5, Some(2)));
        // hub 2 is itself linked to 1, which is not followed
        let group = resolve_group(&store, 5).await.unwrap();
        assert_eq!(group.ids(), vec![2, 5]);
    }
}
