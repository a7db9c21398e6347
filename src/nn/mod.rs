mod network;
pub mod types;

pub use network::Network;
pub use types::Classifier;
