use crate::dependency_analysis::domain::{Cycle, DependencyGraph};
use std::collections::{HashMap, HashSet};

/// Adjacency list: node name -> dependency target names, in insertion order
pub type Adjacency = Vec<(String, Vec<String>)>;

/// CycleDetector enumerates circular dependency chains between projects.
///
/// Depth-first search from every node, keeping the current path with each
/// node's position and a global visited set. Revisiting a node that is on
/// the current path emits the path suffix starting at that node. Reaching
/// a node visited earlier but not on the path stops the descent.
///
/// Cycles are de-duplicated by their sorted member set, so two different
/// edge cycles over the same projects are reported once.
pub struct CycleDetector;

struct SearchState<'a> {
    path: Vec<&'a str>,
    positions: HashMap<&'a str, usize>,
    visited: HashSet<&'a str>,
    seen_keys: HashSet<String>,
    cycles: Vec<Cycle>,
}

impl CycleDetector {
    /// Internal-edge adjacency of the graph, one entry per project.
    /// Duplicate targets (same dependency declared under several kinds) are kept.
    pub fn adjacency(graph: &DependencyGraph) -> Adjacency {
        graph
            .projects()
            .iter()
            .map(|project| {
                let targets = graph
                    .edges_from(project.name())
                    .filter(|e| e.internal)
                    .map(|e| e.to.clone())
                    .collect();
                (project.name().to_string(), targets)
            })
            .collect()
    }

    /// Cycles over the graph's internal edges only
    pub fn find_circular_dependencies(graph: &DependencyGraph) -> Vec<Cycle> {
        Self::find_cycles(&Self::adjacency(graph))
    }

    /// Cycles over an arbitrary adjacency list. Targets without an entry of
    /// their own are treated as leaves.
    pub fn find_cycles(adjacency: &[(String, Vec<String>)]) -> Vec<Cycle> {
        let lookup: HashMap<&str, &[String]> = adjacency
            .iter()
            .map(|(node, targets)| (node.as_str(), targets.as_slice()))
            .collect();

        let mut state = SearchState {
            path: Vec::new(),
            positions: HashMap::new(),
            visited: HashSet::new(),
            seen_keys: HashSet::new(),
            cycles: Vec::new(),
        };

        for (node, _) in adjacency {
            Self::visit(node.as_str(), &lookup, &mut state);
        }

        state.cycles
    }

    fn visit<'a>(node: &'a str, lookup: &HashMap<&'a str, &'a [String]>, state: &mut SearchState<'a>) {
        if let Some(&start) = state.positions.get(node) {
            let cycle = Cycle::new(state.path[start..].iter().map(|n| n.to_string()).collect());
            if state.seen_keys.insert(cycle.canonical_key()) {
                state.cycles.push(cycle);
            }
            return;
        }

        // Fully explored from another start node
        if !state.visited.insert(node) {
            return;
        }

        state.positions.insert(node, state.path.len());
        state.path.push(node);

        if let Some(targets) = lookup.get(node) {
            for next in targets.iter() {
                Self::visit(next.as_str(), lookup, state);
            }
        }

        state.path.pop();
        state.positions.remove(node);
    }
}
