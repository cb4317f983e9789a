mod settings;

pub use settings::{Command, Config, LaunchSettings, ProbeSettings, ReportSettings, Settings};
