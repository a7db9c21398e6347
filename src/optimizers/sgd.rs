use std::path::Path;

use plotly::{Bar, Plot};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::observer::{EpochObserver, LossLog};
use super::{Hyper, Optimizer};
use crate::data::{dimensions, Instance};
use crate::error::{Error, Result};
use crate::nn::{Classifier, Network};

/// One-instance-at-a-time backprop over a training set that is reshuffled every epoch.
///
/// The generator is owned and advanced serially across epochs, so a seeded
/// generator reproduces the same sequence of orderings and the same weights.
pub struct OnlineGradientDescent<'a, R: Rng> {
    network: &'a mut Network,
    training_set: Vec<Instance>,
    hyper: Hyper,
    rng: R,
    observers: Vec<Box<dyn EpochObserver + 'a>>,
    pub losses: Vec<f64>,
}

impl<'a, R: Rng> OnlineGradientDescent<'a, R> {
    /// Fails if `training_set` is empty or does not match the network's
    /// attribute and class counts.
    pub fn new(network: &'a mut Network, training_set: Vec<Instance>, rng: R) -> Result<Self> {
        let (attributes, classes) = dimensions(&training_set)?;
        let expected_attributes = network.input_layer().len() - 1;
        let expected_classes = network.output_layer().len();

        if attributes != expected_attributes || classes != expected_classes {
            return Err(Error::InconsistentInstance {
                index: 0,
                attributes,
                classes,
                expected_attributes,
                expected_classes,
            });
        }

        Ok(OnlineGradientDescent {
            network,
            training_set,
            hyper: Hyper::new(),
            rng,
            observers: vec![],
            losses: vec![],
        })
    }

    pub fn set_learning_rate(&mut self, rate: f64) -> &mut Self {
        self.hyper.learning_rate = rate;
        self
    }

    pub fn set_epochs(&mut self, epochs: usize) -> &mut Self {
        self.hyper.epochs = epochs;
        self
    }

    /// Logs every epoch's mean loss.
    pub fn verbose(&mut self) -> &mut Self {
        self.observe(LossLog)
    }

    pub fn observe(&mut self, observer: impl EpochObserver + 'a) -> &mut Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// The training set in its current (last shuffled) order.
    pub fn training_set(&self) -> &[Instance] {
        &self.training_set
    }

    /// Shuffles, then steps through every instance in order. Returns the mean
    /// loss over the whole set afterwards.
    fn epoch(&mut self) -> f64 {
        self.training_set.shuffle(&mut self.rng);

        for instance in self.training_set.iter() {
            self.network.step(instance, self.hyper.learning_rate);
        }

        self.network.mean_loss(&self.training_set)
    }

    pub fn loss_graph(&mut self, path: &Path) -> &mut Self {
        let mut plot = Plot::new();

        let x = (0..self.losses.len()).collect();

        let trace = Bar::new(x, self.losses.clone());
        plot.add_trace(trace);
        plot.write_html(path);

        self
    }
}

impl<R: Rng> Optimizer for OnlineGradientDescent<'_, R> {
    fn override_hyper(&mut self, hyper: Hyper) -> &mut Self {
        self.hyper = hyper;
        self
    }

    fn train(&mut self) -> &mut Self {
        debug!(
            "Training on {} instances for {} epochs at rate {}",
            self.training_set.len(),
            self.hyper.epochs,
            self.hyper.learning_rate
        );

        for epoch in 0..self.hyper.epochs {
            let loss = self.epoch();
            self.losses.push(loss);

            for observer in self.observers.iter_mut() {
                observer.epoch_end(epoch, loss, &*self.network);
            }
        }

        self
    }
}
