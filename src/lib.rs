pub mod config;
pub mod data;
pub mod error;
pub mod f;
pub mod nn;
pub mod node;
pub mod optimizers;
pub mod util;

pub use data::Instance;
pub use error::{Error, Result};
pub use nn::{Classifier, Network};
pub use node::{Edge, Node, NodeKind};
pub use optimizers::{OnlineGradientDescent, Optimizer};

pub type Dataset = (Vec<Vec<f64>>, Vec<Vec<f64>>);
