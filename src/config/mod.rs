pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod remote;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fraudshield")]
#[command(about = "Scam detection for calls, SMS messages, links and QR codes")]
pub struct CliConfig {
    #[arg(long, help = "TOML rule catalogue overriding the bundled rules")]
    pub catalog_file: Option<String>,

    #[arg(long, help = "HTTP endpoint serving the rule catalogue as JSON")]
    pub rules_endpoint: Option<String>,

    #[arg(long, default_value = "./reports")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage per scan")]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify an incoming call by number and caller id
    ScanCall {
        #[arg(long)]
        number: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Classify an SMS message body
    ScanSms {
        #[arg(long)]
        message: String,
        #[arg(long)]
        sender: Option<String>,
    },
    /// Classify a URL
    ScanLink {
        #[arg(long)]
        url: String,
    },
    /// Classify a decoded QR payload
    ScanQr {
        #[arg(long)]
        content: String,
    },
    /// Scan a JSON batch file and export a report archive
    Report {
        #[arg(long)]
        input: String,
    },
    /// List the bundled fraud-awareness lessons
    Lessons,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;

        if let Some(endpoint) = &self.rules_endpoint {
            validate_url("rules_endpoint", endpoint)?;
        }

        if let Some(path) = &self.catalog_file {
            validate_path("catalog_file", path)?;
        }

        Ok(())
    }
}
