use std::collections::BTreeSet;

use tracing::debug;

use super::{join_ids, missing_start, Traversal};
use crate::graph::{Graph, NodeId};
use crate::step::{AlgorithmStep, Recorder, Traced};

struct Walk<'g> {
    graph: &'g Graph,
    visited: BTreeSet<NodeId>,
    active: BTreeSet<(NodeId, NodeId)>,
    result: Traversal,
    rec: Recorder,
}

impl Walk<'_> {
    fn step(&mut self, description: String) {
        let step = AlgorithmStep::new(description)
            .with_visited(&self.visited)
            .with_active_edges(&self.active);
        self.rec.push(step);
    }

    fn visit(&mut self, node: NodeId, depth: usize) {
        self.visited.insert(node);
        self.result.order.push(node);
        let indent = "  ".repeat(depth);
        self.step(format!("{indent}Visiting {node} (depth {depth})"));
        let graph = self.graph;
        let neighbors = graph.neighbors(node);
        self.step(format!(
            "{indent}Neighbors of {node}: {}",
            join_ids(neighbors.iter().map(|e| e.to))
        ));
        for edge in neighbors {
            let next = edge.to;
            if self.visited.contains(&next) {
                self.step(format!("{indent}{next} was already visited"));
                continue;
            }
            self.active.insert((node, next));
            self.result.tree_edges.push((node, next));
            self.step(format!("{indent}Discovered {next}, going deeper"));
            self.visit(next, depth + 1);
        }
        self.step(format!("{indent}Backtracking from {node}"));
    }
}

/// Recursive depth-first search, marking nodes as they are entered.
/// Step descriptions are indented by recursion depth.
pub fn dfs(graph: &Graph, start: NodeId) -> Traced<Traversal> {
    debug!(start, "dfs");
    if let Some(done) = missing_start(graph, start, || Traversal::empty(start)) {
        return done;
    }
    let mut rec = Recorder::new();
    rec.note("Depth-first search");
    rec.note(format!("Start node: {start}"));

    let mut walk = Walk {
        graph,
        visited: BTreeSet::new(),
        active: BTreeSet::new(),
        result: Traversal::empty(start),
        rec,
    };
    walk.visit(start, 0);
    walk.step("DFS complete".to_string());
    walk.step(format!(
        "Visited nodes: {}",
        join_ids(walk.visited.iter().copied())
    ));
    walk.rec.finish(walk.result)
}
