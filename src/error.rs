use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No instances were supplied to size the input and output layers.
    #[error("Training set is empty, cannot infer layer sizes")]
    EmptyTrainingSet,

    /// An instance disagrees with the first one on attribute or class count.
    #[error("Instance {index} has {attributes} attributes and {classes} classes, expected {expected_attributes} and {expected_classes}")]
    InconsistentInstance {
        index: usize,
        attributes: usize,
        classes: usize,
        expected_attributes: usize,
        expected_classes: usize,
    },

    /// A label vector is not one-hot.
    #[error("Class values {0:?} are not one-hot")]
    NotOneHot(Vec<f64>),

    #[error("{layer} weights have shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        layer: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// The input layer is not inputs followed by its bias, or a hidden node
    /// does not read the whole input layer in order.
    #[error("{0} layer is not wired to its parent layer in order")]
    MalformedLayer(&'static str),

    /// An output node's parents do not line up with the hidden layer.
    #[error("Output node {0} is not wired to the hidden layer in order")]
    Misaligned(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
}
