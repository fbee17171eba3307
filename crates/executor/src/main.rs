pub mod config;
pub mod csv_streamer;
pub mod error;
pub mod planner;
pub mod producer;
pub mod simulator;
pub mod types;
pub mod writer;

use std::env;
use std::fs::File;
use std::io::{self, Write};
use tokio::sync::{mpsc, mpsc::Sender, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use csv_streamer::CsvStreamer;
use error::Error;
use planner::Planner;
use producer::Producer;
use simulator::SimulatorStreamer;
use types::{DataSource, PlanRequest, PlanResult};
use writer::Writer;

#[tokio::main]
async fn main() {
    init_tracing();

    let source = parse_args();
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load config");
            std::process::exit(1);
        }
    };

    let sink = match open_sink(config.pipeline.output_path.as_deref()) {
        Ok(sink) => sink,
        Err(e) => {
            error!(error = %e, "Failed to open output");
            std::process::exit(1);
        }
    };

    let capacity = config.pipeline.channel_capacity.max(1);
    let (request_tx, request_rx) = mpsc::channel::<Vec<PlanRequest>>(capacity);
    let (result_tx, result_rx) = mpsc::channel::<Vec<PlanResult>>(capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(());

    // Spawn tasks
    let producer_handle = spawn_producer(&source, request_tx, &config);
    let planner_handle =
        Planner::new(request_rx, result_tx, config.model.clone()).spawn_task();
    let writer_handle = Writer::new(result_rx, sink, shutdown_rx).spawn_task();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down.");
            let _ = shutdown_tx.send(());
        }
    });

    let (producer, planner, writer) = tokio::join!(producer_handle, planner_handle, writer_handle);

    report("producer", producer);
    report("planner", planner);
    report("writer", writer);

    info!("Pipeline shut down.");
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Parse command-line arguments to determine data source
fn parse_args() -> DataSource {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("executor", String::as_str);
    let source = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "sim".to_string());

    match source.as_str() {
        "sim" => DataSource::Sim,
        "csv" => match args.get(2) {
            Some(path) => DataSource::Csv(path.clone()),
            None => usage(program),
        },
        _ => usage(program),
    }
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <SIM|CSV> [path_to_csv]\n  - SIM: plan randomly generated snapshots\n  - CSV: plan snapshots read from a CSV file",
        program
    );
    std::process::exit(1);
}

/// Plans go to the configured file, or to stdout while logs stay on stderr.
fn open_sink(output_path: Option<&str>) -> Result<Box<dyn Write + Send>, Error> {
    match output_path {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

pub fn spawn_producer(
    source: &DataSource,
    sender: Sender<Vec<PlanRequest>>,
    config: &config::Config,
) -> JoinHandle<Result<(), Error>> {
    match source {
        DataSource::Sim => {
            info!("Starting SimulatorStreamer producer task...");
            let streamer = SimulatorStreamer::new(config.simulator.clone());
            Producer::new(streamer).spawn(sender)
        }
        DataSource::Csv(path) => {
            info!(path = %path, "Starting CsvStreamer producer task...");
            let streamer = CsvStreamer::new(path.clone(), config.pipeline.batch_size);
            Producer::new(streamer).spawn(sender)
        }
    }
}

fn report<T: std::fmt::Debug>(
    task: &str,
    outcome: Result<Result<T, Error>, tokio::task::JoinError>,
) {
    match outcome {
        Ok(Ok(value)) => info!(task, result = ?value, "Task finished"),
        Ok(Err(e)) => error!(task, error = %e, "Task failed"),
        Err(e) => error!(task, error = %e, "Task panicked or was cancelled"),
    }
}
