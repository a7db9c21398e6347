use std::io::Write;

use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{dimensions, Instance};
use crate::error::{Error, Result};
use crate::node::{Node, NodeKind};

use super::types::Classifier;

const RULE: &str =
    "-------------------------------------------------------------------------------------------";

/// Input, hidden and output layers, each ending in its bias node where one exists.
///
/// Hidden nodes take every input node (bias last) as parents, output nodes take
/// every hidden node (bias last). Parent links are indices into the previous layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Network {
    input: Vec<Node>,
    hidden: Vec<Node>,
    output: Vec<Node>,
}

impl Network {
    /// Sizes the input and output layers from `training_set`.
    ///
    /// `hidden_weights` is `hidden_count × (attributes + 1)` and `output_weights` is
    /// `classes × (hidden_count + 1)`, rows being destination units and columns source units.
    pub fn new(
        training_set: &[Instance],
        hidden_count: usize,
        hidden_weights: &Array2<f64>,
        output_weights: &Array2<f64>,
    ) -> Result<Network> {
        let (d_in, d_out) = dimensions(training_set)?;
        Network::weave(d_in, d_out, hidden_count, hidden_weights, output_weights)
    }

    pub fn weave(
        d_in: usize,
        d_out: usize,
        hidden_count: usize,
        hidden_weights: &Array2<f64>,
        output_weights: &Array2<f64>,
    ) -> Result<Network> {
        check_shape("Hidden", (hidden_count, d_in + 1), hidden_weights)?;
        check_shape("Output", (d_out, hidden_count + 1), output_weights)?;

        let mut input = (0..d_in)
            .map(|_| Node::new(NodeKind::Input))
            .collect::<Vec<Node>>();
        input.push(Node::new(NodeKind::BiasToHidden));

        let mut hidden = hidden_weights
            .rows()
            .into_iter()
            .map(|row| Node::wired(NodeKind::Hidden, row.iter().copied()))
            .collect::<Vec<Node>>();
        hidden.push(Node::new(NodeKind::BiasToOutput));

        let output = output_weights
            .rows()
            .into_iter()
            .map(|row| Node::wired(NodeKind::Output, row.iter().copied()))
            .collect::<Vec<Node>>();

        let network = Network {
            input,
            hidden,
            output,
        };
        network.check_alignment()?;

        debug!(
            "Wove network {} -> {} -> {} (bias units included)",
            network.input.len(),
            network.hidden.len(),
            network.output.len()
        );

        Ok(network)
    }

    /// Uniform initial weights in `[-range, range)`, shaped for `weave`.
    pub fn random_weights<R: Rng>(
        d_in: usize,
        d_out: usize,
        hidden_count: usize,
        range: f64,
        rng: &mut R,
    ) -> (Array2<f64>, Array2<f64>) {
        let distribution = Uniform::new(-range, range);
        let hidden_weights = Array2::random_using((hidden_count, d_in + 1), distribution, rng);
        let output_weights = Array2::random_using((d_out, hidden_count + 1), distribution, rng);
        (hidden_weights, output_weights)
    }

    /// Every hidden node must read the whole input layer in order, and every
    /// output node the whole hidden layer in order, so that hidden position `k`
    /// and output parent position `k` name the same unit during backprop.
    fn check_alignment(&self) -> Result<()> {
        let aligned = |node: &Node, prev: &[Node]| {
            node.parents().len() == prev.len()
                && node
                    .parents()
                    .iter()
                    .enumerate()
                    .all(|(k, edge)| edge.parent == k)
        };

        let input_ok = self.input.last().map(|n| n.kind()) == Some(NodeKind::BiasToHidden)
            && self.input[..self.input.len() - 1]
                .iter()
                .all(|n| n.kind() == NodeKind::Input);
        let hidden_ok = self.hidden.last().map(|n| n.kind()) == Some(NodeKind::BiasToOutput)
            && self.hidden[..self.hidden.len() - 1]
                .iter()
                .all(|n| n.kind() == NodeKind::Hidden && aligned(n, &self.input));

        if !input_ok {
            return Err(Error::MalformedLayer("Input"));
        }
        if !hidden_ok {
            return Err(Error::MalformedLayer("Hidden"));
        }

        for (j, node) in self.output.iter().enumerate() {
            if node.kind() != NodeKind::Output || !aligned(node, &self.hidden) {
                return Err(Error::Misaligned(j));
            }
        }

        Ok(())
    }

    pub fn input_layer(&self) -> &[Node] {
        &self.input
    }

    pub fn hidden_layer(&self) -> &[Node] {
        &self.hidden
    }

    pub fn output_layer(&self) -> &[Node] {
        &self.output
    }

    /// Forward then backward on a single instance.
    pub fn step(&mut self, instance: &Instance, learning_rate: f64) {
        let scores = self.forward(instance);
        self.backwards(&scores, instance.class_values(), learning_rate);
    }

    pub fn hidden_weights(&self) -> Array2<f64> {
        weights_of(&self.hidden[..self.hidden.len() - 1], self.input.len())
    }

    pub fn output_weights(&self) -> Array2<f64> {
        weights_of(&self.output, self.hidden.len())
    }

    /// Plain-text weight report for one epoch, one weight per line.
    pub fn write_weights<W: Write>(&self, epoch: usize, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "EPOCH: {}", epoch)?;
        writeln!(out, "**************************")?;
        writeln!(
            out,
            "Updated Weights between the Hidden and Input Layers after Epoch {}",
            epoch
        )?;
        writeln!(out, "{}", RULE)?;
        for node in self.hidden.iter() {
            for edge in node.parents() {
                writeln!(out, "{:?}", edge.weight)?;
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "Updated Weights between the Output and Hidden Layers after Epoch {}",
            epoch
        )?;
        writeln!(out, "{}", RULE)?;
        for node in self.output.iter() {
            for edge in node.parents() {
                writeln!(out, "{:?}", edge.weight)?;
            }
        }
        writeln!(out)?;

        Ok(())
    }

    pub fn dump(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn load(serialized: &[u8]) -> Result<Network> {
        let network: Network = bincode::deserialize(serialized)?;
        network.check_alignment()?;
        Ok(network)
    }
}

impl Classifier for Network {
    /// Class probabilities for one instance. Overwrites the activations of the previous call.
    fn forward(&mut self, instance: &Instance) -> Vec<f64> {
        let attributes = instance.attributes();
        assert_eq!(
            attributes.len(),
            self.input.len() - 1,
            "Instance has {} attributes, network expects {}",
            attributes.len(),
            self.input.len() - 1
        );

        for (node, v) in self.input.iter_mut().zip(attributes.iter()) {
            node.set_input(*v);
        }

        for node in self.hidden.iter_mut() {
            node.calculate_output(&self.input);
        }

        let mut max_logit = f64::NEG_INFINITY;
        for node in self.output.iter_mut() {
            node.calculate_output(&self.hidden);
            max_logit = max_logit.max(node.output());
        }

        let mut exp_sum = 0.;
        for node in self.output.iter_mut() {
            node.exponentiate(max_logit);
            exp_sum += node.output();
        }

        self.output
            .iter_mut()
            .map(|node| {
                node.normalize_output(exp_sum);
                node.output()
            })
            .collect()
    }

    /// One backprop step against `target`, given the `scores` of the forward
    /// pass that just ran. All deltas are computed from the current weights
    /// before any weight moves.
    fn backwards(&mut self, scores: &[f64], target: &[f64], learning_rate: f64) {
        let mut upstream = vec![0.; self.hidden.len()];

        for (j, node) in self.output.iter_mut().enumerate() {
            node.calculate_delta(target[j] - scores[j]);
            let d = node.delta();
            for edge in node.parents() {
                upstream[edge.parent] += edge.weight * d;
            }
        }

        for (node, signal) in self.hidden.iter_mut().zip(upstream) {
            node.calculate_delta(signal);
        }

        for node in self.hidden.iter_mut() {
            node.update_weight(&self.input, learning_rate);
        }
        for node in self.output.iter_mut() {
            node.update_weight(&self.hidden, learning_rate);
        }
    }
}

fn check_shape(layer: &'static str, expected: (usize, usize), w: &Array2<f64>) -> Result<()> {
    if w.dim() != expected {
        return Err(Error::ShapeMismatch {
            layer,
            expected,
            found: w.dim(),
        });
    }
    Ok(())
}

fn weights_of(nodes: &[Node], fan_in: usize) -> Array2<f64> {
    Array2::from_shape_fn((nodes.len(), fan_in), |(i, j)| nodes[i].parents()[j].weight)
}
