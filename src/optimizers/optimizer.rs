#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyper {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Hyper {
    pub fn new() -> Hyper {
        Hyper {
            learning_rate: 0.01,
            epochs: 100,
        }
    }
}

impl Default for Hyper {
    fn default() -> Self {
        Hyper::new()
    }
}

pub trait Optimizer {
    fn override_hyper(&mut self, hyper: Hyper) -> &mut Self;
    /// Runs every configured epoch.
    fn train(&mut self) -> &mut Self;
}
