use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::nn::Network;
use crate::util::scientific;

/// Called once at the end of every epoch with the epoch index and the mean training loss.
pub trait EpochObserver {
    fn epoch_end(&mut self, epoch: usize, loss: f64, network: &Network);
}

impl<F> EpochObserver for F
where
    F: FnMut(usize, f64, &Network),
{
    fn epoch_end(&mut self, epoch: usize, loss: f64, network: &Network) {
        self(epoch, loss, network)
    }
}

/// Logs `Epoch: <i>, Loss: <loss>` with the loss in scientific notation.
pub struct LossLog;

impl LossLog {
    pub fn line(epoch: usize, loss: f64) -> String {
        format!("Epoch: {}, Loss: {}", epoch, scientific(loss, 3))
    }
}

impl EpochObserver for LossLog {
    fn epoch_end(&mut self, epoch: usize, loss: f64, _network: &Network) {
        info!("{}", LossLog::line(epoch, loss));
    }
}

/// Appends the network's weights to a text file after every epoch.
/// A file that cannot be opened or written is reported and skipped.
pub struct WeightReport {
    path: PathBuf,
}

impl WeightReport {
    pub fn new(path: impl Into<PathBuf>) -> WeightReport {
        WeightReport { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, epoch: usize, network: &Network) -> std::io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut out = BufWriter::new(file);
        network.write_weights(epoch, &mut out)?;
        out.flush()
    }
}

impl EpochObserver for WeightReport {
    fn epoch_end(&mut self, epoch: usize, _loss: f64, network: &Network) {
        if let Err(e) = self.append(epoch, network) {
            warn!("No file for weight output at {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::fs;

    fn tiny() -> Network {
        Network::weave(1, 2, 1, &array![[0.1, 0.2]], &array![[0.3, 0.4], [0.5, 0.6]]).unwrap()
    }

    #[test]
    fn weight_report_appends_each_epoch() {
        let dir = std::env::temp_dir().join("shallow_test_weight_report");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let mut report = WeightReport::new(dir.join("weights.txt"));

        let network = tiny();
        report.epoch_end(0, 1., &network);
        report.epoch_end(1, 1., &network);

        let text = fs::read_to_string(report.path()).unwrap();
        assert!(text.starts_with("EPOCH: 0\n"));
        assert!(text.contains("\nEPOCH: 1\n"));
        assert_eq!(text.lines().filter(|l| *l == "0.4").count(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn weight_report_survives_missing_directory() {
        let mut report = WeightReport::new("/nonexistent/shallow/weights.txt");
        report.epoch_end(0, 1., &tiny());
        assert!(!report.path().exists());
    }

    #[test]
    fn loss_line_format() {
        assert_eq!(LossLog::line(0, 2f64.ln()), "Epoch: 0, Loss: 6.931e-01");
        assert_eq!(LossLog::line(12, 0.0123), "Epoch: 12, Loss: 1.230e-02");
    }

    #[test]
    fn closures_observe() {
        let mut seen = vec![];
        {
            let mut observer = |epoch: usize, loss: f64, _: &Network| seen.push((epoch, loss));
            observer.epoch_end(4, 0.5, &tiny());
        }
        assert_eq!(seen, vec![(4, 0.5)]);
    }
}
