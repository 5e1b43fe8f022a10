//! Output formatting

use clap::ValueEnum;
use report_submit::SubmissionOutcome;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse a config-file format name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name, true).ok()
    }

    pub fn render(&self, outcome: &SubmissionOutcome) -> String {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(outcome).unwrap_or_default(),
            OutputFormat::Yaml => serde_yaml::to_string(outcome).unwrap_or_default(),
            OutputFormat::Table => Table::new([OutcomeRow::from(outcome)]).to_string(),
        }
    }

    pub fn print(&self, outcome: &SubmissionOutcome) {
        println!("{}", self.render(outcome).trim_end());
    }
}

#[derive(Debug, Tabled)]
struct OutcomeRow {
    result: String,
    error: String,
}

impl From<&SubmissionOutcome> for OutcomeRow {
    fn from(outcome: &SubmissionOutcome) -> Self {
        Self {
            result: outcome.result().to_string(),
            error: outcome.message().unwrap_or("-").to_string(),
        }
    }
}
