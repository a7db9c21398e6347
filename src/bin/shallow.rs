use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use shallow::config::{Overrides, TrainConfig};
use shallow::data::{dimensions, read_dataset};
use shallow::optimizers::WeightReport;
use shallow::util::{init_logging, scientific};
use shallow::{Classifier, Network, OnlineGradientDescent, Optimizer};

/// Train a one-hidden-layer classifier with online backprop
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON array of {"attributes": [...], "class_values": [...]} instances
    #[arg(short, long, value_name = "PATH")]
    data: PathBuf,
    /// JSON training config, see `TrainConfig`
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "INT")]
    hidden: Option<usize>,
    #[arg(short, long, value_name = "FLOAT")]
    learning_rate: Option<f64>,
    #[arg(short, long, value_name = "INT")]
    epochs: Option<usize>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Append per-epoch weights to this file
    #[arg(short, long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Write the trained network here (bincode)
    #[arg(long, value_name = "PATH")]
    checkpoint: Option<PathBuf>,
    /// Write an HTML chart of the per-epoch loss here
    #[arg(long, value_name = "PATH")]
    loss_graph: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;
    let args = Cli::parse();

    let base = match &args.config {
        Some(path) => TrainConfig::load(path)?,
        None => TrainConfig::default(),
    };
    let config = base.merge(Overrides {
        hidden_count: args.hidden,
        learning_rate: args.learning_rate,
        max_epoch: args.epochs,
        seed: args.seed,
        report: args.report,
    });
    if config.weight_range <= 0. {
        return Err(format!("weight_range must be positive, got {}", config.weight_range).into());
    }

    let training_set = read_dataset(&args.data)?;
    let (d_in, d_out) = dimensions(&training_set)?;
    info!(
        "Loaded {} instances with {} attributes and {} classes",
        training_set.len(),
        d_in,
        d_out
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (hidden_weights, output_weights) =
        Network::random_weights(d_in, d_out, config.hidden_count, config.weight_range, &mut rng);
    let mut network = Network::new(
        &training_set,
        config.hidden_count,
        &hidden_weights,
        &output_weights,
    )?;

    {
        let mut trainer = OnlineGradientDescent::new(&mut network, training_set.clone(), rng)?;
        trainer.override_hyper(config.hyper()).verbose();
        if let Some(path) = &config.report {
            trainer.observe(WeightReport::new(path));
        }
        trainer.train();

        if let Some(path) = &args.loss_graph {
            trainer.loss_graph(path);
        }
    }

    info!(
        "Training accuracy {}%, mean loss {}",
        network.accuracy(&training_set),
        scientific(network.mean_loss(&training_set), 3)
    );

    if let Some(path) = &args.checkpoint {
        fs::write(path, network.dump()?)?;
        info!("Wrote network to {}", path.display());
    }

    Ok(())
}
