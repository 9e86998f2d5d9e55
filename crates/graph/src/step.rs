//! Step records produced by the graph algorithms.

use std::collections::{BTreeMap, BTreeSet};

use algolab_core::step_log::STEP_TARGET;
use serde::Serialize;
use tracing::trace;

use crate::distance::Distance;
use crate::graph::NodeId;

/// One narrated step with optional snapshots of the algorithm's state at
/// that moment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlgorithmStep {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<BTreeSet<NodeId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_edges: Option<BTreeSet<(NodeId, NodeId)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<BTreeMap<NodeId, Distance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<BTreeMap<NodeId, NodeId>>,
}

impl AlgorithmStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_visited(mut self, visited: &BTreeSet<NodeId>) -> Self {
        self.visited = Some(visited.clone());
        self
    }

    pub fn with_active_edges(mut self, edges: &BTreeSet<(NodeId, NodeId)>) -> Self {
        self.active_edges = Some(edges.clone());
        self
    }

    pub fn with_distances(mut self, distances: &BTreeMap<NodeId, Distance>) -> Self {
        self.distances = Some(distances.clone());
        self
    }

    pub fn with_parents(mut self, parents: &BTreeMap<NodeId, NodeId>) -> Self {
        self.parents = Some(parents.clone());
        self
    }
}

/// An algorithm's ordered steps plus its structured answer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Traced<R> {
    pub steps: Vec<AlgorithmStep>,
    pub result: R,
}

impl<R> Traced<R> {
    pub fn descriptions(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(|s| s.description.as_str())
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.descriptions().any(|d| d.contains(needle))
    }

    pub fn into_parts(self) -> (Vec<AlgorithmStep>, R) {
        (self.steps, self.result)
    }
}

/// Collects steps and mirrors each description to the step tracing target.
#[derive(Default)]
pub(crate) struct Recorder {
    steps: Vec<AlgorithmStep>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: AlgorithmStep) {
        trace!(target: STEP_TARGET, "{}", step.description);
        self.steps.push(step);
    }

    /// A step with no snapshot.
    pub(crate) fn note(&mut self, description: impl Into<String>) {
        self.push(AlgorithmStep::new(description));
    }

    pub(crate) fn finish<R>(self, result: R) -> Traced<R> {
        Traced {
            steps: self.steps,
            result,
        }
    }
}
