//! Report Submit CLI
//!
//! # Usage
//!
//! ```bash
//! report-submit -f name=Ada -f message="Printer on fire"
//! report-submit -f name=Ada --file screenshot=./screen.png --format json
//! report-submit --endpoint http://localhost:8080/exec --position bottom-left -f k=v
//! ```

use std::path::PathBuf;

use clap::Parser;
use report_submit::{App, AppConfig, ReportForm, ToastPosition};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "report-submit")]
#[command(version)]
#[command(about = "Submit a report form and show the outcome", long_about = None)]
struct Cli {
    /// Report endpoint URL
    #[arg(long, env = "REPORT_SUBMIT_ENDPOINT")]
    endpoint: Option<String>,

    /// Config file (defaults to ~/.report-submit/config.toml)
    #[arg(long, short, env = "REPORT_SUBMIT_CONFIG")]
    config: Option<PathBuf>,

    /// Profile name from the config directory
    #[arg(long, short)]
    profile: Option<String>,

    /// Output format
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Toast position
    #[arg(long)]
    position: Option<ToastPosition>,

    /// Toast duration in milliseconds (0 keeps it on screen)
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Text field, as key=value (repeatable)
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// File field, as key=path (repeatable)
    #[arg(long = "file", value_name = "KEY=PATH")]
    files: Vec<String>,
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig, String> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(self.profile.as_deref()),
        }
        .map_err(|e| e.to_string())?;

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(position) = self.position {
            config.toast.position = Some(position);
        }
        if let Some(duration_ms) = self.duration_ms {
            config.toast.duration_ms = Some(duration_ms);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    fn build_form(&self) -> Result<ReportForm, String> {
        let mut form = ReportForm::new();
        for field in &self.fields {
            form.push_pair(field).map_err(|e| e.to_string())?;
        }
        for file in &self.files {
            form.push_file(file).map_err(|e| e.to_string())?;
        }
        Ok(form)
    }

    fn output_format(&self, config: &AppConfig) -> OutputFormat {
        self.format
            .or_else(|| config.default_format.as_deref().and_then(OutputFormat::from_name))
            .unwrap_or(OutputFormat::Table)
    }
}

fn init_tracing(config: &AppConfig) {
    let default_level = config.log_level.clone().unwrap_or_else(|| "info".into());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(default_level),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<bool, String> {
    let config = cli.load_config()?;
    init_tracing(&config);

    tracing::info!("report-submit v{}", env!("CARGO_PKG_VERSION"));

    let form = cli.build_form()?;
    if form.is_empty() {
        tracing::warn!("submitting an empty form");
    }

    let format = cli.output_format(&config);
    let app = App::new(&config).map_err(|e| e.to_string())?;

    let outcome = app.submit(form).await;
    format.print(&outcome);

    Ok(outcome.is_success())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("report-submit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_fields_and_files_repeat() {
        let cli = parse(&["-f", "name=Ada", "--field", "msg=hi", "--file", "log=./a.log"]);
        assert_eq!(cli.fields, vec!["name=Ada", "msg=hi"]);
        assert_eq!(cli.files, vec!["log=./a.log"]);
    }

    #[test]
    fn test_build_form_from_fields() {
        let form = parse(&["-f", "name=Ada", "-f", "msg=a=b"]).build_form().unwrap();
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn test_build_form_rejects_bad_field() {
        let err = parse(&["-f", "nonsense"]).build_form().unwrap_err();
        assert!(err.contains("nonsense"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "endpoint = \"http://file.test/exec\"\ndefault_format = \"yaml\"\n[toast]\nduration_ms = 100\n",
        )
        .unwrap();

        let cli = parse(&[
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "http://flag.test/exec",
            "--position",
            "bottom-right",
        ]);
        let config = cli.load_config().unwrap();

        assert_eq!(config.endpoint.as_deref(), Some("http://flag.test/exec"));
        let toast = config.toast_config();
        assert_eq!(toast.position, ToastPosition::BottomRight);
        assert_eq!(toast.duration.as_millis(), 100);
        assert_eq!(cli.output_format(&config), OutputFormat::Yaml);
    }

    #[test]
    fn test_format_flag_wins() {
        let cli = parse(&["--format", "json"]);
        let config = AppConfig {
            default_format: Some("yaml".into()),
            ..Default::default()
        };
        assert_eq!(cli.output_format(&config), OutputFormat::Json);
        assert_eq!(parse(&[]).output_format(&AppConfig::default()), OutputFormat::Table);
    }
}
