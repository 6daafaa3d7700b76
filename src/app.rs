//! Main application orchestration and execution

use crate::{
    cli::{Cli, Command, LoadArgs},
    config::{display_config_summary, load_config},
    error::{AppError, Result},
    headers,
    loader::LoaderFactory,
    models::{LoadConfig, Report},
    output::OutputFormatterFactory,
    shutdown::spawn_signal_closer,
};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Main application struct that dispatches the parsed command
pub struct App {
    cli: Cli,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        match &self.cli.command {
            Command::Load(args) => self.run_load(args.clone()).await,
            Command::Meet(args) => {
                println!("{}", greeting(&args.name));
                Ok(())
            }
        }
    }

    async fn run_load(&self, args: LoadArgs) -> Result<()> {
        let config = load_config(args, self.cli.use_colors())?;
        debug!("Configuration summary:\n{}", display_config_summary(&config));

        let factory = LoaderFactory::new()?;
        let cancel = CancellationToken::new();
        let closer = spawn_signal_closer(cancel.clone());

        let result = execute_load(&config, &factory, &cancel).await;
        closer.abort();
        let report = result?;

        let formatter = OutputFormatterFactory::create_formatter(config.output_format()?, config.enable_color);
        let output = formatter.format(&report)?;
        println!("{}", output.trim_end());

        Ok(())
    }
}

/// Read the request inputs named by `config` and run a load with a loader from `factory`
pub async fn execute_load(config: &LoadConfig, factory: &LoaderFactory, cancel: &CancellationToken) -> Result<Report> {
    let headers = config
        .headers_path
        .as_deref()
        .map(headers::read_from_file)
        .transpose()
        .map_err(|e| e.context("read headers"))?;

    let body = config
        .body_path
        .as_deref()
        .map(read_body)
        .transpose()
        .map_err(|e| e.context("read body"))?;

    let loader = factory.create_for_config(config);
    info!(
        host = %config.host,
        strategy = loader.strategy(),
        parallelism = loader.parallelism(),
        requests = config.requests,
        "starting load"
    );

    loader
        .load(cancel, &config.host, headers.as_ref(), body.as_deref())
        .await
        .map_err(|e| e.context("load"))
}

/// Read a request body file
pub fn read_body(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| AppError::io(format!("read {} file: {}", path.display(), e)))
}

/// Greeting printed by the `meet` command
pub fn greeting(name: &str) -> String {
    format!("hello, {}!", name)
}
