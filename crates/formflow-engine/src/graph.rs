//! Derived dependency graph over active questions.
//!
//! The graph is rebuilt from the definition snapshot on every call; it is
//! never stored. An edge `A -> B` means some condition on B inspects the
//! answer of A.

use std::collections::{BTreeMap, BTreeSet};

use formflow_model::{Question, QuestionId};

/// Adjacency mapping used by the traversal primitives.
pub type Edges = BTreeMap<QuestionId, BTreeSet<QuestionId>>;

/// A condition reference whose target is not an active question in the
/// snapshot. Recorded as data for the validator; never an error here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// The question owning the condition.
    pub from: QuestionId,
    /// The referenced id that did not resolve.
    pub to: QuestionId,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Active question ids (graph nodes).
    nodes: BTreeSet<QuestionId>,
    /// Source id -> ids of questions whose conditions reference it.
    dependents: Edges,
    /// Dependent id -> the source ids its conditions require.
    sources: Edges,
    /// Condition references that do not resolve to an active question.
    dangling: Vec<DanglingReference>,
}

impl DependencyGraph {
    /// Build the graph from the full question set. Inactive questions are
    /// filtered here; references pointing at them surface as dangling.
    pub fn build(questions: &[Question]) -> Self {
        let mut graph = Self::default();
        for question in questions {
            if question.active {
                graph.nodes.insert(question.id.clone());
            }
        }
        for question in questions {
            if !question.active {
                continue;
            }
            for condition in &question.conditions {
                let source = &condition.source_question_id;
                if graph.nodes.contains(source) {
                    graph
                        .dependents
                        .entry(source.clone())
                        .or_default()
                        .insert(question.id.clone());
                    graph
                        .sources
                        .entry(question.id.clone())
                        .or_default()
                        .insert(source.clone());
                } else {
                    graph.dangling.push(DanglingReference {
                        from: question.id.clone(),
                        to: source.clone(),
                    });
                }
            }
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            dangling = graph.dangling.len(),
            "built dependency graph"
        );
        graph
    }

    pub fn nodes(&self) -> impl Iterator<Item = &QuestionId> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(BTreeSet::len).sum()
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.nodes.contains(id)
    }

    /// Questions whose conditions directly reference `id`.
    pub fn dependents_of(&self, id: &QuestionId) -> impl Iterator<Item = &QuestionId> {
        self.dependents.get(id).into_iter().flatten()
    }

    /// The source ids required by the conditions of `id`.
    pub fn sources_of(&self, id: &QuestionId) -> impl Iterator<Item = &QuestionId> {
        self.sources.get(id).into_iter().flatten()
    }

    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// Cycles among the condition edges, each reported as the list of
    /// participating ids in traversal order.
    pub fn cycles(&self) -> Vec<Vec<QuestionId>> {
        find_cycles(&self.nodes, &self.dependents)
    }
}

/// Depth-first cycle detection with an explicit on-stack set.
///
/// Each node is expanded once, so the walk is O(V+E) and terminates on any
/// finite graph, self-loops included. A node already on the current stack
/// closes a cycle; the stack slice from that node is the cycle path.
pub fn find_cycles(nodes: &BTreeSet<QuestionId>, edges: &Edges) -> Vec<Vec<QuestionId>> {
    let mut cycles = Vec::new();
    let mut visited: BTreeSet<&QuestionId> = BTreeSet::new();
    for start in nodes {
        if visited.contains(start) {
            continue;
        }
        let mut stack: Vec<(&QuestionId, bool)> = vec![(start, false)];
        let mut path: Vec<&QuestionId> = Vec::new();
        let mut on_stack: BTreeSet<&QuestionId> = BTreeSet::new();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                path.pop();
                on_stack.remove(node);
                continue;
            }
            if on_stack.contains(node) {
                let position = path
                    .iter()
                    .position(|entry| *entry == node)
                    .unwrap_or_default();
                cycles.push(path[position..].iter().map(|id| (*id).clone()).collect());
                continue;
            }
            if visited.contains(node) {
                continue;
            }
            visited.insert(node);
            on_stack.insert(node);
            path.push(node);
            stack.push((node, true));
            if let Some(next) = edges.get(node) {
                for neighbor in next {
                    stack.push((neighbor, false));
                }
            }
        }
    }
    cycles
}

/// Transitive closure from `start` over the given edges, excluding `start`
/// itself. The visited set makes the walk safe on cyclic or otherwise
/// malformed input.
pub fn reachable_from(start: &QuestionId, edges: &Edges) -> BTreeSet<QuestionId> {
    let mut visited: BTreeSet<QuestionId> = BTreeSet::new();
    let mut pending: Vec<&QuestionId> = vec![start];
    while let Some(node) = pending.pop() {
        if let Some(next) = edges.get(node) {
            for neighbor in next {
                if neighbor != start && visited.insert(neighbor.clone()) {
                    pending.push(neighbor);
                }
            }
        }
    }
    visited
}
