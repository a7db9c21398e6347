use serde::{Deserialize, Serialize};

use crate::f::{d_sigmoid, sigmoid};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Input,
    BiasToHidden,
    Hidden,
    BiasToOutput,
    Output,
}

impl NodeKind {
    pub fn is_bias(&self) -> bool {
        matches!(self, NodeKind::BiasToHidden | NodeKind::BiasToOutput)
    }
}

/// Incoming connection: index of the parent in the previous layer and the edge weight.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub parent: usize,
    pub weight: f64,
}

/// A single unit. Hidden and output nodes read their parents out of the
/// previous layer, which is passed in by the owning network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    value: f64,
    delta: f64,
    parents: Vec<Edge>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Node {
        let value = match kind.is_bias() {
            true => 1.,
            false => 0.,
        };

        Node {
            kind,
            value,
            delta: 0.,
            parents: vec![],
        }
    }

    /// A hidden or output node wired to the previous layer, one weight per parent in order.
    pub fn wired(kind: NodeKind, weights: impl IntoIterator<Item = f64>) -> Node {
        assert!(
            matches!(kind, NodeKind::Hidden | NodeKind::Output),
            "Only hidden and output nodes have parents, got {:?}",
            kind
        );

        let mut node = Node::new(kind);
        node.parents = weights
            .into_iter()
            .enumerate()
            .map(|(parent, weight)| Edge { parent, weight })
            .collect();
        node
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parents(&self) -> &[Edge] {
        &self.parents
    }

    pub fn output(&self) -> f64 {
        self.value
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn set_input(&mut self, v: f64) {
        assert_eq!(self.kind, NodeKind::Input, "set_input on a {:?} node", self.kind);
        self.value = v;
    }

    fn weighted_sum(&self, prev: &[Node]) -> f64 {
        self.parents
            .iter()
            .map(|edge| edge.weight * prev[edge.parent].value)
            .sum()
    }

    /// Hidden nodes take the sigmoid of their weighted input. Output nodes
    /// store the raw logit `z` and wait for `exponentiate` and
    /// `normalize_output`. Input and bias nodes are left alone.
    pub fn calculate_output(&mut self, prev: &[Node]) {
        match self.kind {
            NodeKind::Hidden => self.value = sigmoid(self.weighted_sum(prev)),
            NodeKind::Output => self.value = self.weighted_sum(prev),
            _ => (),
        }
    }

    /// Replaces the stored logit with `e^(z - shift)`. With `shift` set to the
    /// layer's largest logit the exponent is never positive.
    pub fn exponentiate(&mut self, shift: f64) {
        assert_eq!(self.kind, NodeKind::Output, "exponentiate on a {:?} node", self.kind);
        self.value = (self.value - shift).exp();
    }

    pub fn normalize_output(&mut self, exp_sum: f64) {
        assert_eq!(self.kind, NodeKind::Output, "normalize_output on a {:?} node", self.kind);
        self.value /= exp_sum;
    }

    /// For output nodes `error_signal` is `target - probability`; softmax with
    /// cross-entropy leaves no extra derivative factor. For hidden nodes it is
    /// the delta-weighted sum over the output layer.
    pub fn calculate_delta(&mut self, error_signal: f64) {
        match self.kind {
            NodeKind::Output => self.delta = error_signal,
            NodeKind::Hidden => self.delta = error_signal * d_sigmoid(self.value),
            _ => (),
        }
    }

    pub fn update_weight(&mut self, prev: &[Node], learning_rate: f64) {
        let delta = self.delta;
        for edge in self.parents.iter_mut() {
            edge.weight += learning_rate * delta * prev[edge.parent].value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn input_layer(values: &[f64]) -> Vec<Node> {
        let mut layer = values
            .iter()
            .map(|v| {
                let mut node = Node::new(NodeKind::Input);
                node.set_input(*v);
                node
            })
            .collect::<Vec<Node>>();
        layer.push(Node::new(NodeKind::BiasToHidden));
        layer
    }

    #[test]
    fn bias_nodes_are_constant() {
        let mut bias = Node::new(NodeKind::BiasToOutput);
        bias.calculate_output(&input_layer(&[3., 4.]));
        bias.calculate_delta(10.);
        bias.update_weight(&[], 1.);

        assert_eq!(bias.output(), 1.);
        assert_eq!(bias.delta(), 0.);
        assert!(bias.parents().is_empty());
    }

    #[test]
    #[should_panic]
    fn bias_rejects_input() {
        Node::new(NodeKind::BiasToHidden).set_input(0.);
    }

    #[test]
    fn hidden_node_applies_sigmoid() {
        let prev = input_layer(&[1., 0.]);
        let mut hidden = Node::wired(NodeKind::Hidden, [0.5, 2., -0.5]);
        hidden.calculate_output(&prev);

        assert_abs_diff_eq!(hidden.output(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn output_node_exponentiates_then_normalizes() {
        let prev = input_layer(&[1., 2.]);
        let mut out = Node::wired(NodeKind::Output, [1., 0., 0.]);
        out.calculate_output(&prev);
        assert_eq!(out.output(), 1.);

        out.exponentiate(0.);
        assert_abs_diff_eq!(out.output(), 1f64.exp(), epsilon = 1e-12);

        out.normalize_output(2. * 1f64.exp());
        assert_abs_diff_eq!(out.output(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn shifted_exponent_stays_finite() {
        let prev = input_layer(&[1000.]);
        let mut out = Node::wired(NodeKind::Output, [1., 0.]);
        out.calculate_output(&prev);
        out.exponentiate(1000.);
        assert_eq!(out.output(), 1.);
    }

    #[test]
    #[should_panic]
    fn hidden_rejects_exponentiate() {
        Node::wired(NodeKind::Hidden, [0.]).exponentiate(0.);
    }

    #[test]
    fn deltas_follow_node_kind() {
        let mut out = Node::wired(NodeKind::Output, [0.]);
        out.calculate_delta(-0.25);
        assert_eq!(out.delta(), -0.25);

        let prev = input_layer(&[]);
        let mut hidden = Node::wired(NodeKind::Hidden, [0.]);
        hidden.calculate_output(&prev);
        hidden.calculate_delta(2.);
        assert_eq!(hidden.delta(), 2. * 0.25);
    }

    #[test]
    fn update_scales_by_parent_output() {
        let prev = input_layer(&[2., -1.]);
        let mut out = Node::wired(NodeKind::Output, [0., 0., 0.]);
        out.calculate_delta(0.5);
        out.update_weight(&prev, 0.1);

        let weights = out.parents().iter().map(|e| e.weight).collect::<Vec<f64>>();
        assert_abs_diff_eq!(weights[0], 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(weights[1], -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(weights[2], 0.05, epsilon = 1e-12);
    }
}
