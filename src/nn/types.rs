use crate::data::Instance;
use crate::f::{argmax, cross_entropy, mean};

pub trait Classifier {
    /// Per-class probabilities for one instance.
    fn forward(&mut self, instance: &Instance) -> Vec<f64>;
    fn backwards(&mut self, scores: &[f64], target: &[f64], learning_rate: f64);

    fn predict(&mut self, instance: &Instance) -> usize {
        argmax(&self.forward(instance))
    }

    fn loss(&mut self, instance: &Instance) -> f64 {
        let scores = self.forward(instance);
        cross_entropy(&scores, instance.class_values())
    }

    /// Mean cross-entropy over `instances`, summed in the order given.
    fn mean_loss(&mut self, instances: &[Instance]) -> f64 {
        let losses = instances
            .iter()
            .map(|instance| self.loss(instance))
            .collect::<Vec<f64>>();
        mean(&losses)
    }

    /// Percentage of `instances` whose predicted class matches the label.
    fn accuracy(&mut self, instances: &[Instance]) -> f64 {
        let predicted = instances
            .iter()
            .map(|instance| self.predict(instance))
            .collect::<Vec<usize>>();
        let actual = instances
            .iter()
            .map(|instance| instance.label())
            .collect::<Vec<usize>>();
        crate::f::accuracy(&predicted, &actual)
    }
}
