// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Kahn's algorithm, stable with respect to the input order of the nodes.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// The graph contains a cycle; `remaining` holds every node that could not be
/// ordered, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<T> {
    /// Nodes on, or downstream of, a cycle.
    pub remaining: Vec<T>,
}

/// Orders `nodes` so that for every edge `(before, after)` the first comes
/// before the second.
///
/// Edges that mention a node outside `nodes` are ignored. Nodes that are
/// independent keep their relative input order.
pub fn topological_sort<T>(
    nodes: impl IntoIterator<Item = T>,
    edges: impl IntoIterator<Item = (T, T)>,
) -> Result<Vec<T>, CycleError<T>>
where
    T: Copy + Eq + Hash,
{
    let node_list: Vec<T> = nodes.into_iter().collect();
    let known: HashSet<T> = node_list.iter().copied().collect();

    let mut dependents: HashMap<T, Vec<T>> = HashMap::new();
    let mut in_degree: HashMap<T, usize> = node_list.iter().map(|n| (*n, 0)).collect();

    for (before, after) in edges {
        if !known.contains(&before) || !known.contains(&after) {
            continue;
        }
        dependents.entry(before).or_default().push(after);
        if let Some(degree) = in_degree.get_mut(&after) {
            *degree += 1;
        }
    }

    let mut queue: VecDeque<T> = node_list
        .iter()
        .copied()
        .filter(|n| in_degree.get(n).copied().unwrap_or(0) == 0)
        .collect();

    let mut sorted = Vec::with_capacity(node_list.len());
    while let Some(node) = queue.pop_front() {
        sorted.push(node);
        if let Some(children) = dependents.get(&node) {
            for child in children {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*child);
                    }
                }
            }
        }
    }

    if sorted.len() == node_list.len() {
        Ok(sorted)
    } else {
        let placed: HashSet<T> = sorted.into_iter().collect();
        Err(CycleError {
            remaining: node_list
                .into_iter()
                .filter(|n| !placed.contains(n))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies_come_first() {
        let order = topological_sort(
            ["Baz", "Foo", "Bar", "Base"],
            [("Base", "Foo"), ("Bar", "Foo"), ("Foo", "Baz"), ("Bar", "Baz")],
        )
        .unwrap();

        let pos = |name| order.iter().position(|n| *n == name).unwrap();
        assert!(pos("Base") < pos("Foo"));
        assert!(pos("Bar") < pos("Foo"));
        assert!(pos("Foo") < pos("Baz"));
    }

    #[test]
    fn test_independent_nodes_keep_input_order() {
        let order = topological_sort(["c", "a", "b"], std::iter::empty()).unwrap();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_edges_to_unknown_nodes_are_ignored() {
        let order = topological_sort(["Child"], [("AlreadyDefined", "Child")]).unwrap();
        assert_eq!(order, vec!["Child"]);
    }

    #[test]
    fn test_cycle_reports_remaining_nodes() {
        let err = topological_sort(
            ["Root", "A", "B", "Leaf"],
            [("A", "B"), ("B", "A"), ("B", "Leaf")],
        )
        .unwrap_err();
        assert_eq!(err.remaining, vec!["A", "B", "Leaf"]);
    }

    #[test]
    fn test_empty_graph() {
        let order: Vec<u32> = topological_sort(Vec::new(), Vec::new()).unwrap();
        assert!(order.is_empty());
    }
}
