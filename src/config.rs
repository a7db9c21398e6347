use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::optimizers::Hyper;

/// Training run settings. Every field can be omitted from the JSON file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrainConfig {
    pub hidden_count: usize,
    pub learning_rate: f64,
    pub max_epoch: usize,
    pub seed: u64,
    /// Initial weights are drawn from `[-weight_range, weight_range)`.
    pub weight_range: f64,
    /// Weight report appended to after every epoch.
    pub report: Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            hidden_count: 4,
            learning_rate: 0.01,
            max_epoch: 100,
            seed: 1,
            weight_range: 0.01,
            report: None,
        }
    }
}

/// Per-field overrides, as read from the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub hidden_count: Option<usize>,
    pub learning_rate: Option<f64>,
    pub max_epoch: Option<usize>,
    pub seed: Option<u64>,
    pub report: Option<PathBuf>,
}

impl TrainConfig {
    pub fn load(path: &Path) -> Result<TrainConfig> {
        let serial = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&serial)?)
    }

    // the overrides win where they are set
    pub fn merge(self, other: Overrides) -> Self {
        Self {
            hidden_count: other.hidden_count.unwrap_or(self.hidden_count),
            learning_rate: other.learning_rate.unwrap_or(self.learning_rate),
            max_epoch: other.max_epoch.unwrap_or(self.max_epoch),
            seed: other.seed.unwrap_or(self.seed),
            weight_range: self.weight_range,
            report: other.report.or(self.report),
        }
    }

    pub fn hyper(&self) -> Hyper {
        Hyper {
            epochs: self.max_epoch,
            learning_rate: self.learning_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: TrainConfig =
            serde_json::from_str(r#"{ "hidden_count": 8, "report": "w.txt" }"#).unwrap();
        assert_eq!(config.hidden_count, 8);
        assert_eq!(config.report, Some(PathBuf::from("w.txt")));
        assert_eq!(config.max_epoch, TrainConfig::default().max_epoch);
    }

    #[test]
    fn overrides_win() {
        let merged = TrainConfig::default().merge(Overrides {
            max_epoch: Some(3),
            seed: Some(99),
            ..Overrides::default()
        });
        assert_eq!(merged.max_epoch, 3);
        assert_eq!(merged.seed, 99);
        assert_eq!(merged.hidden_count, 4);

        let hyper = merged.hyper();
        assert_eq!(hyper.epochs, 3);
        assert_eq!(hyper.learning_rate, 0.01);
    }
}
