//! InMemoryGraphStore - 開発・テスト用のグラフストア
//!
//! Design:
//! - Nodes: TaskId -> TaskNode
//! - Edges: task -> tasks it depends on (keyed by the dependent, `to`)
//!
//! Every read walks from a dependent towards its dependencies (direct
//! dependencies, reachability, project filtering on the dependent side), so
//! the one index keyed by `to` serves them all.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DependencyRelation, ProjectId, TaskId, TaskNode};
use crate::ports::{GraphStore, StoreResult};

#[derive(Default)]
struct GraphState {
    nodes: HashMap<TaskId, TaskNode>,

    /// task -> tasks it depends on.
    edges: HashMap<TaskId, HashSet<TaskId>>,
}

impl GraphState {
    fn link(&mut self, relation: &DependencyRelation) {
        self.edges
            .entry(relation.to.clone())
            .or_default()
            .insert(relation.from.clone());
    }

    fn unlink(&mut self, relation: &DependencyRelation) {
        if let Entry::Occupied(mut e) = self.edges.entry(relation.to.clone()) {
            e.get_mut().remove(&relation.from);
            if e.get().is_empty() {
                e.remove_entry();
            }
        }
    }

    fn has_edge(&self, relation: &DependencyRelation) -> bool {
        self.edges
            .get(&relation.to)
            .is_some_and(|deps| deps.contains(&relation.from))
    }

    /// Breadth-first walk along depends-on edges starting at `task`.
    ///
    /// The visited set keeps shared ancestors (diamonds) from being expanded twice.
    fn reaches(&self, task: &TaskId, target: &TaskId) -> bool {
        let mut visited: HashSet<&TaskId> = HashSet::new();
        let mut queue: VecDeque<&TaskId> = VecDeque::new();
        queue.push_back(task);
        visited.insert(task);

        while let Some(node) = queue.pop_front() {
            let Some(deps) = self.edges.get(node) else {
                continue;
            };
            for dep in deps {
                if dep == target {
                    return true;
                }
                if visited.insert(dep) {
                    queue.push_back(dep);
                }
            }
        }
        false
    }

    fn project_edges(&self, project: &ProjectId) -> Vec<DependencyRelation> {
        let mut out: Vec<DependencyRelation> = self
            .edges
            .iter()
            .filter(|(to, _)| {
                self.nodes
                    .get(*to)
                    .is_some_and(|node| &node.project_id == project)
            })
            .flat_map(|(to, deps)| {
                deps.iter()
                    .map(move |from| DependencyRelation::new(from.clone(), to.clone()))
            })
            .collect();
        out.sort_by(|a, b| (&a.to, &a.from).cmp(&(&b.to, &b.from)));
        out
    }
}

/// In-memory graph store.
///
/// All operations take the single state lock, so each call is atomic; nothing
/// spans calls.
#[derive(Clone, Default)]
pub struct InMemoryGraphStore {
    state: Arc<Mutex<GraphState>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of depends-on edges currently stored.
    pub async fn edge_count(&self) -> usize {
        let state = self.state.lock().await;
        state.edges.values().map(HashSet::len).sum()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn upsert_node(&self, node: &TaskNode) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state
            .nodes
            .entry(node.id.clone())
            .or_insert_with(|| node.clone());
        Ok(())
    }

    async fn get_node(&self, id: &TaskId) -> StoreResult<Option<TaskNode>> {
        let state = self.state.lock().await;
        Ok(state.nodes.get(id).cloned())
    }

    async fn insert_edge(&self, relation: &DependencyRelation) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        // MATCH semantics: both endpoints must be present, otherwise nothing is written.
        if !state.nodes.contains_key(&relation.from) {
            return Ok(());
        }
        let Some(dependent) = state.nodes.get_mut(&relation.to) else {
            return Ok(());
        };
        dependent.blocked = true;
        state.link(relation);
        Ok(())
    }

    async fn delete_edge(&self, relation: &DependencyRelation) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.unlink(relation);
        Ok(())
    }

    async fn edge_exists(&self, relation: &DependencyRelation) -> StoreResult<bool> {
        let state = self.state.lock().await;
        Ok(state.has_edge(relation))
    }

    async fn depends_transitively(&self, task: &TaskId, target: &TaskId) -> StoreResult<bool> {
        let state = self.state.lock().await;
        Ok(state.reaches(task, target))
    }

    async fn dependencies_of(&self, task: &TaskId) -> StoreResult<Vec<TaskNode>> {
        let state = self.state.lock().await;
        let mut out: Vec<TaskNode> = state
            .edges
            .get(task)
            .map(|deps| {
                deps.iter()
                    .filter_map(|id| state.nodes.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    async fn set_blocked(&self, task: &TaskId, blocked: bool) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if let Some(node) = state.nodes.get_mut(task) {
            node.blocked = blocked;
        }
        Ok(())
    }

    async fn nodes_in_project(&self, project: &ProjectId) -> StoreResult<Vec<TaskNode>> {
        let state = self.state.lock().await;
        let mut out: Vec<TaskNode> = state
            .nodes
            .values()
            .filter(|node| &node.project_id == project)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    async fn edges_in_project(&self, project: &ProjectId) -> StoreResult<Vec<DependencyRelation>> {
        let state = self.state.lock().await;
        Ok(state.project_edges(project))
    }
}
