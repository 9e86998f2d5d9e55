//! Graph algorithms that record every decision as a replayable step.
//!
//! | Module | Contents |
//! |--------|----------|
//! [`graph`] | [`Graph`] holder: nodes, canonical edge list, adjacency arcs |
//! [`spec`] | serde [`GraphSpec`] for loading graphs from JSON |
//! [`step`] | [`AlgorithmStep`] snapshots and the [`Traced`] wrapper |
//! [`distance`] | [`Distance`], a finite length or unreachable |
//! [`union_find`] | arena-indexed disjoint sets used by Kruskal |
//! [`algorithms`] | BFS, DFS, Dijkstra, Prim, Kruskal, Bellman-Ford, Floyd-Warshall |

pub mod algorithms;
pub mod distance;
pub mod graph;
pub mod spec;
pub mod step;
pub mod union_find;

pub use algorithms::{
    bellman_ford, bfs, dfs, dijkstra, floyd_warshall, kruskal, prim, BellmanFordOutcome,
    DistanceMatrix, ShortestPaths, SpanningTree, Traversal,
};
pub use distance::Distance;
pub use graph::{Edge, Graph, GraphNode, NodeId, Weight};
pub use spec::{EdgeSpec, GraphError, GraphSpec, NodeSpec};
pub use step::{AlgorithmStep, Traced};
pub use union_find::UnionFind;
