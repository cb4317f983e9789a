use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Ops toolkit for a hosted checkout integration")]
pub struct Config {
    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate the usage report from the evolution log
    Report {
        /// Path to the evolution log JSON document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to write the markdown report to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Launch the checkout backend and relay shutdown signals to it
    Launch {
        /// Command to launch (overrides the configured one)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Send a manual create-checkout-session request and dump the response
    Probe {
        /// Price identifier to put in the request body
        #[arg(long)]
        price: Option<String>,

        /// Checkout mode ("payment" or "subscription")
        #[arg(long)]
        mode: Option<String>,
    },
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Usage report settings
    #[serde(default)]
    pub report: ReportSettings,

    /// Backend launcher settings
    #[serde(default)]
    pub launch: LaunchSettings,

    /// Checkout probe settings
    #[serde(default)]
    pub probe: ProbeSettings,
}

/// Usage report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Report title (level-1 heading)
    #[serde(default = "default_report_title")]
    pub title: String,

    /// Path to the evolution log JSON document
    #[serde(default = "default_report_input")]
    pub input: PathBuf,

    /// Path the markdown report is written to
    #[serde(default = "default_report_output")]
    pub output: PathBuf,
}

fn default_report_title() -> String {
    "Usage Report".to_string()
}

fn default_report_input() -> PathBuf {
    PathBuf::from("evolution_log.json")
}

fn default_report_output() -> PathBuf {
    PathBuf::from("usage_report.md")
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            input: default_report_input(),
            output: default_report_output(),
        }
    }
}

/// Backend launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSettings {
    /// Command line to launch, split on whitespace (no shell quoting)
    #[serde(default = "default_launch_command")]
    pub command: String,

    /// Working directory the backend is launched in
    #[serde(default = "default_launch_working_dir")]
    pub working_dir: PathBuf,
}

fn default_launch_command() -> String {
    "npm run server".to_string()
}

fn default_launch_working_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            command: default_launch_command(),
            working_dir: default_launch_working_dir(),
        }
    }
}

/// Checkout probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Endpoint the create-checkout-session request is POSTed to
    #[serde(default = "default_probe_endpoint")]
    pub endpoint: String,

    /// Price identifier sent in the request body
    #[serde(default)]
    pub price_id: String,

    /// Checkout mode: "payment" or "subscription"
    #[serde(default = "default_probe_mode")]
    pub mode: String,

    /// Redirect URL after successful payment
    #[serde(default = "default_probe_success_url")]
    pub success_url: String,

    /// Redirect URL after cancelled checkout
    #[serde(default = "default_probe_cancel_url")]
    pub cancel_url: String,

    /// Name of the environment variable holding the bearer token.
    /// The token itself is never stored in the config file.
    #[serde(default = "default_probe_token_env")]
    pub token_env: String,
}

fn default_probe_endpoint() -> String {
    "http://localhost:4242/create-checkout-session".to_string()
}

fn default_probe_mode() -> String {
    "subscription".to_string()
}

fn default_probe_success_url() -> String {
    "http://localhost:3000/success".to_string()
}

fn default_probe_cancel_url() -> String {
    "http://localhost:3000/cancel".to_string()
}

fn default_probe_token_env() -> String {
    "CHECKOUT_TOKEN".to_string()
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            endpoint: default_probe_endpoint(),
            price_id: String::new(),
            mode: default_probe_mode(),
            success_url: default_probe_success_url(),
            cancel_url: default_probe_cancel_url(),
            token_env: default_probe_token_env(),
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {:?}", p))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", p));
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("payops/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/payops/config.toml")),
            dirs::home_dir().map(|p| p.join(".payops.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", path));
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        match &cli.command {
            Command::Report { input, output } => {
                if let Some(input) = input {
                    self.report.input = input.clone();
                }
                if let Some(output) = output {
                    self.report.output = output.clone();
                }
            }
            Command::Launch { args } => {
                if !args.is_empty() {
                    self.launch.command = args.join(" ");
                }
            }
            Command::Probe { price, mode } => {
                if let Some(price) = price {
                    self.probe.price_id = price.clone();
                }
                if let Some(mode) = mode {
                    self.probe.mode = mode.clone();
                }
            }
        }
    }

    /// Validate and normalize settings values
    ///
    /// Unknown probe modes are reset to the default rather than sent to the
    /// backend, which rejects them with an opaque 400.
    pub fn validate(&mut self) {
        self.probe.mode = self.probe.mode.to_lowercase();
        if self.probe.mode != "payment" && self.probe.mode != "subscription" {
            tracing::warn!(
                "Unknown probe mode {:?}, falling back to {:?}",
                self.probe.mode,
                default_probe_mode()
            );
            self.probe.mode = default_probe_mode();
        }
    }
}
