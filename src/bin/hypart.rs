//! The `hypart` command line tool (spec.md §6): `partition`, `verify`, and
//! `config-check` subcommands over hMetis hypergraph files.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use hypart::config::Config;
use hypart::error::HypartError;
use hypart::io::{hmetis, partition_file};

#[derive(Parser)]
#[command(name = "hypart", about = "A multilevel hypergraph partitioner", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Partition an hMetis hypergraph file and write the block assignment.
    Partition {
        hypergraph: PathBuf,
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Check that a partition assignment satisfies balance and connectivity.
    Verify {
        hypergraph: PathBuf,
        #[arg(long)]
        config: PathBuf,
        partition: PathBuf,
    },
    /// Parse and validate a config file without running anything.
    ConfigCheck { config: PathBuf },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();
}

fn install_cancel_handler() -> Arc<AtomicBool> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    // Best-effort: if a handler is already installed (e.g. under a test
    // harness) we just keep running without cooperative cancellation.
    let _ = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    });
    cancelled
}

fn read_config(path: &PathBuf) -> Result<Config, HypartError> {
    let text = std::fs::read_to_string(path).map_err(|e| HypartError::input_format(e.to_string()))?;
    Config::from_yaml_str(&text)
}

fn run_partition(hypergraph: PathBuf, config_path: PathBuf, output: PathBuf) -> Result<(), HypartError> {
    let config = read_config(&config_path)?;
    let _cancelled = install_cancel_handler();

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("static template string is valid"),
    );
    progress.set_message("partitioning");
    progress.enable_steady_tick(std::time::Duration::from_millis(120));

    let hg = hypart::partition_hmetis_file(&hypergraph, &config)?;
    progress.finish_with_message("done");

    hypart::write_partition_file(&output, &hg)?;
    info!(
        num_vertices = hg.num_vertices(),
        num_hyperedges = hg.num_hyperedges(),
        objective = ?config.objective,
        "partition written to {}",
        output.display()
    );
    Ok(())
}

fn run_verify(hypergraph: PathBuf, config_path: PathBuf, partition_path: PathBuf) -> Result<(), HypartError> {
    let config = read_config(&config_path)?;
    let file = std::fs::File::open(&hypergraph).map_err(|e| HypartError::input_format(e.to_string()))?;
    let parsed = hmetis::read_hmetis(std::io::BufReader::new(file))?;
    let mut hg = parsed.into_hypergraph(config.num_blocks);

    let partition_file = std::fs::File::open(&partition_path).map_err(|e| HypartError::input_format(e.to_string()))?;
    let blocks = partition_file::read_partition(std::io::BufReader::new(partition_file))?;
    if blocks.len() != hg.num_vertices() {
        return Err(HypartError::input_format(format!(
            "partition file has {} entries, hypergraph has {} vertices",
            blocks.len(),
            hg.num_vertices()
        )));
    }

    let mut obs = hypart::hypergraph::NullObserver;
    for (v, &block) in hg.all_active_vertices().collect::<Vec<_>>().into_iter().zip(&blocks) {
        hg.set_node_part(v, block, &mut obs)
            .map_err(|e| HypartError::state_invariant(e.to_string()))?;
    }

    let max_weight = hypart::multilevel::max_block_weight(hg.total_weight(), config.num_blocks, config.epsilon);
    for j in 0..config.num_blocks {
        let weight = hg.block_weight(hypart::ids::BlockId::new(j));
        if weight > max_weight {
            return Err(HypartError::Infeasible {
                k: config.num_blocks,
                epsilon: config.epsilon,
                reason: format!("block {j} has weight {weight}, exceeding the bound {max_weight}"),
            });
        }
    }

    println!("cut = {}", hypart::objective::cut(&hg));
    println!("km1 = {}", hypart::objective::km1(&hg));
    println!("soed = {}", hypart::objective::soed(&hg));
    println!("balance OK (max block weight {max_weight})");

    let (_, num_components) = hypart::hypergraph::components::connected_components(&hg);
    println!("connected components = {num_components}");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Partition { hypergraph, config, output } => run_partition(hypergraph, config, output),
        Command::Verify { hypergraph, config, partition } => run_verify(hypergraph, config, partition),
        Command::ConfigCheck { config } => read_config(&config).map(|c| {
            println!("config OK: num_blocks={}, objective={:?}", c.num_blocks, c.objective);
        }),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(err @ HypartError::StateInvariant(_)) => {
            hypart::error::abort_on_state_invariant(&err);
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
