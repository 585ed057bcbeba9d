//! CLI runner - executes commands

use crate::auth::Credential;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::endpoints::{DateRange, SiteQuery, TimeRange};
use crate::error::Result;
use crate::pagination::RecordStream;
use crate::session::Session;
use futures::TryStreamExt;
use serde::Serialize;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the client config, or the defaults when no file was given
    pub fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::load(path),
            None => Ok(ClientConfig::default()),
        }
    }

    /// Run the CLI command inside a session
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let credential = Credential::from_env()?;
        let command = self.cli.command.clone();
        let output = Output(self.cli.format);

        Session::with_session(credential, config, move |session| {
            Box::pin(async move { execute(session, &command, output).await })
        })
        .await
    }
}

async fn execute(session: &Session, command: &Commands, output: Output) -> Result<()> {
    match command {
        Commands::Sites { search, status } => {
            let mut query = SiteQuery::new();
            if let Some(text) = search {
                query = query.search(text.clone());
            }
            for s in status {
                query = query.status(*s);
            }
            output.stream(session.list_sites_with(&query)).await
        }
        Commands::Site { site_id } => output.one(&session.site_details(*site_id).await?),
        Commands::Inverters { site_id } => output.stream(session.list_inverters(*site_id)).await,
        Commands::Components { site_id } => {
            output.stream(session.list_components(*site_id)).await
        }
        Commands::Telemetry {
            site_id,
            serial,
            start,
            end,
        } => {
            let stream = session.get_power_data(*site_id, serial, *start, *end)?;
            output.stream(stream).await
        }
        Commands::Power {
            site_id,
            start,
            end,
        } => {
            let range = TimeRange::new(*start, *end)?;
            output.one(&session.site_power(*site_id, range).await?)
        }
        Commands::Energy {
            site_id,
            start,
            end,
            unit,
        } => {
            let range = DateRange::new(*start, *end)?;
            output.one(&session.site_energy(*site_id, range, *unit).await?)
        }
        Commands::Timeframe {
            site_id,
            start,
            end,
        } => {
            let range = DateRange::new(*start, *end)?;
            output.one(&session.time_frame_energy(*site_id, range).await?)
        }
        Commands::EnergyDetails {
            site_id,
            start,
            end,
            unit,
            meter,
        } => {
            let range = TimeRange::new(*start, *end)?;
            output.one(&session.energy_details(*site_id, range, *unit, meter).await?)
        }
        Commands::PowerDetails {
            site_id,
            start,
            end,
            meter,
        } => {
            let range = TimeRange::new(*start, *end)?;
            output.one(&session.power_details(*site_id, range, meter).await?)
        }
        Commands::Flow { site_id } => output.one(&session.current_power_flow(*site_id).await?),
        Commands::Storage {
            site_id,
            start,
            end,
            serial,
        } => {
            let range = TimeRange::new(*start, *end)?;
            let serials: Vec<&str> = serial.iter().map(String::as_str).collect();
            output.one(&session.storage_data(*site_id, range, &serials).await?)
        }
        Commands::Benefits { site_id, units } => {
            output.one(&session.env_benefits(*site_id, *units).await?)
        }
        Commands::Overview { site_id } => output.one(&session.overview(*site_id).await?),
        Commands::Period { site_id } => output.one(&session.data_period(*site_id).await?),
        Commands::Version { supported: true } => output.stream(session.supported_versions()).await,
        Commands::Version { supported: false } => output.one(&session.current_version().await?),
    }
}

/// Writes records to stdout
#[derive(Debug, Clone, Copy)]
struct Output(OutputFormat);

impl Output {
    fn one<T: Serialize>(self, record: &T) -> Result<()> {
        let line = match self.0 {
            OutputFormat::Json => serde_json::to_string(record)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(record)?,
        };
        println!("{line}");
        Ok(())
    }

    /// Print records as they arrive; earlier records stay printed if a later page fails
    async fn stream<T: Serialize>(self, mut records: RecordStream<'_, T>) -> Result<()> {
        let mut count = 0usize;
        while let Some(record) = records.try_next().await? {
            self.one(&record)?;
            count += 1;
        }
        info!("Wrote {count} records");
        Ok(())
    }
}
