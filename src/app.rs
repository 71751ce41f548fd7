//! Main application orchestration and execution

use crate::cli::Cli;
use crate::config::{display_config_summary, load_config, validate_config};
use crate::connectivity::{Capability, ConnectivitySource, StaticConnectivity};
use crate::error::Result;
use crate::output::SinkFactory;
use crate::probe::HttpProbeRunner;
use crate::scheduler::{BatchCoordinator, Scheduler};
use log::info;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Main application struct that wires all components together
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        Ok(Self { cli })
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.cli)?;
        let warnings = validate_config(&config)?;

        if config.debug {
            println!(
                "{} v{} (built {}, commit {})",
                crate::PKG_NAME,
                crate::VERSION,
                option_env!("BUILD_TIME").unwrap_or("unknown"),
                option_env!("GIT_COMMIT").unwrap_or("unknown"),
            );
            println!("Configuration:\n{}", display_config_summary(&config));
        }

        if !config.json_output {
            for warning in &warnings {
                println!("{}", warning.format(config.enable_color));
            }
        }

        // The connectivity source is an external collaborator; without a
        // platform integration the monitor runs always-online on the
        // periodic timer alone.
        let mut source = StaticConnectivity::supported();
        let events = source.subscribe();

        let sink = SinkFactory::create(&config);
        let runner = Arc::new(HttpProbeRunner::new(&config)?);
        let coordinator = Arc::new(BatchCoordinator::new(
            runner,
            Arc::clone(&sink),
            config.batch_deadline,
        ));

        if source.capability() == Capability::Unsupported {
            coordinator.render_unsupported();
            return Ok(());
        }

        if config.once {
            coordinator.run_to_completion().await;
            return Ok(());
        }

        let shutdown = CancellationToken::new();
        {
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received");
                    shutdown.cancel();
                }
            });
        }

        if !config.json_output {
            println!(
                "Measuring every {}s; press Ctrl-C to stop.",
                config.interval.as_secs()
            );
        }

        let scheduler = Scheduler::new(
            Arc::clone(&coordinator),
            config.interval,
            source.capability(),
            events,
            shutdown,
        );
        scheduler.run().await;

        Ok(())
    }
}
