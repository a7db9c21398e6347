mod observer;
mod optimizer;
mod sgd;

pub use observer::{EpochObserver, LossLog, WeightReport};
pub use optimizer::{Hyper, Optimizer};
pub use sgd::OnlineGradientDescent;
