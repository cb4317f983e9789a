use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use payops::config::{Command, Config, Settings};
use payops::launch::{self, LaunchSpec};
use payops::{probe, report};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate();

    match &cli.command {
        Command::Report { .. } => report::generate(
            &settings.report.title,
            &settings.report.input,
            &settings.report.output,
        ),
        Command::Launch { .. } => {
            let (command, args) = launch::parse_command(&settings.launch.command);
            anyhow::ensure!(!command.is_empty(), "launch.command is not configured");

            let spec = LaunchSpec {
                command,
                args,
                working_dir: settings.launch.working_dir.clone(),
            };
            let code = launch::run(&spec)?;
            std::process::exit(code);
        }
        Command::Probe { .. } => probe::run(&settings.probe),
    }
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("payops=debug")
    } else {
        EnvFilter::new("payops=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
