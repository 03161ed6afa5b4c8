use clap::Parser;
use stationweave::chunk_reader::DEFAULT_CHUNK_SIZE;
use stationweave::{EngineConfig, ErrorStrategy, run_file_async};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stationweave")]
#[command(about = "Computes min/mean/max per station from a key;value measurements file")]
#[command(version)]
struct Args {
  /// Measurements file, one `station;value` record per line
  #[arg(env = "STATIONWEAVE_INPUT", default_value = "measurements.txt")]
  input: PathBuf,

  /// Bytes per read
  #[arg(long, env = "STATIONWEAVE_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
  chunk_size: usize,

  /// Parallel partitions (0 = one per core, 1 = single-threaded)
  #[arg(long, env = "STATIONWEAVE_WORKERS", default_value_t = 1)]
  workers: usize,

  /// Skip malformed records instead of aborting
  #[arg(long)]
  skip_malformed: bool,
}

impl Args {
  fn config(&self) -> EngineConfig {
    let strategy = if self.skip_malformed {
      ErrorStrategy::Skip
    } else {
      ErrorStrategy::Stop
    };
    EngineConfig::default()
      .with_chunk_size(self.chunk_size)
      .with_workers(self.workers)
      .with_error_strategy(strategy)
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();

  let args = Args::parse();
  let config = args.config();
  info!(input = %args.input.display(), ?config, "running calculations");

  let start = Instant::now();
  let result = run_file_async(&args.input, &config).await;
  let elapsed = start.elapsed();

  match result {
    Ok(summary) => {
      println!("{summary}");
      info!(?elapsed, "took {:.3}s to run", elapsed.as_secs_f64());
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!(input = %args.input.display(), error = %e, ?elapsed, "run failed");
      ExitCode::FAILURE
    }
  }
}
