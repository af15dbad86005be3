// Step Activity Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/step-activity-simulator MEDIUM 10
// ```
//
// Or without a broker, printing events to stdout:
//
// ```console
// $ ./target/release/step-activity-simulator LOW_TO_HIGH 4 --transport stdout --max-ticks 12 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use std::process;
use std::sync::Arc;
use step_activity_simulator::publish::{
    MessagePublisher, NatsPublisher, PublishFailure, StdoutPublisher,
};
use step_activity_simulator::simulation::{
    rng_from_seed, LoggingConfig, Scheduler, SimulationStatistics,
};
use step_activity_simulator::types::{CliArgs, SimulationConfig, TransportKind};
use step_activity_simulator::user::UserRegistry;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Load configuration first; the log directory may come from the config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = LoggingConfig::for_run(&args, &config).init() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Step Activity Simulator");

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    let registry = match UserRegistry::from_config(&config) {
        Ok(registry) => registry,
        Err(e) => fail("Failed to create users", &e),
    };

    info!(users = %registry, "Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no events will be published.");
        print_configuration_summary(&config, &registry);
        return;
    }

    print_startup_banner(&config, &registry);

    match run_simulation(&config, registry).await {
        Ok(statistics) => {
            print_final_statistics(&statistics);
            info!("Step Activity Simulator completed successfully");
        }
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            eprintln!("Simulation failed: {:#}", e);
            process::exit(1);
        }
    }
}

/// Report a fatal startup error and exit before anything is scheduled
fn fail(context: &str, error: &dyn std::fmt::Display) -> ! {
    error!("{}: {}", context, error);
    eprintln!("{}: {}", context, error);
    process::exit(1);
}

/// Build the publisher selected by the configuration
fn build_publisher(config: &SimulationConfig) -> Arc<dyn MessagePublisher> {
    match config.transport {
        TransportKind::Nats => Arc::new(NatsPublisher::new(config.nats_url.clone())),
        TransportKind::Stdout => Arc::new(StdoutPublisher::new()),
    }
}

/// Connect, tick until the limit or Ctrl-C, then drain the queue
async fn run_simulation(
    config: &SimulationConfig,
    registry: UserRegistry,
) -> anyhow::Result<SimulationStatistics> {
    let publisher = build_publisher(config);
    let mut scheduler = Scheduler::new(registry, publisher, rng_from_seed(config.seed))
        .with_failure_hook(Arc::new(|failure: &PublishFailure| {
            error!(
                user_id = %failure.user_id,
                topic = %failure.topic,
                tick = failure.tick,
                "Message delivery failed: {}",
                failure.error
            );
        }));

    scheduler
        .start()
        .await
        .with_context(|| format!("could not start the {} transport", config.transport))?;

    let outcome = scheduler
        .run(config.tick_interval(), config.max_ticks)
        .await
        .context("tick loop aborted");

    let statistics = scheduler.shutdown().await;
    outcome?;
    Ok(statistics)
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig, registry: &UserRegistry) {
    eprintln!("Step Activity Simulator");
    eprintln!("=======================");
    eprintln!("Synthetic wearable step telemetry");
    eprintln!();

    print_configuration_summary(config, registry);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig, registry: &UserRegistry) {
    eprintln!("Configuration:");
    eprintln!("  Behavior Class: {}", config.behavior_class);
    eprintln!("  Users: {}", registry);
    eprintln!("  Tick Interval: {} ms", config.tick_interval_ms);
    match config.max_ticks {
        Some(max) => eprintln!("  Max Ticks: {}", max),
        None => eprintln!("  Max Ticks: until interrupted"),
    }
    eprintln!("  Transport: {}", config.transport);
    if config.transport == TransportKind::Nats {
        eprintln!("  NATS URL: {}", config.nats_url);
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    if let Some(dir) = &config.log_dir {
        eprintln!("  Log Directory: {}", dir);
    }
    eprintln!();
}

/// Print the end-of-run summary
fn print_final_statistics(statistics: &SimulationStatistics) {
    eprintln!("{}", statistics);
}
