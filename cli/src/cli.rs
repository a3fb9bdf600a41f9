use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use watchskip_core::config::DEFAULT_BASE_URL;
use watchskip_core::{Classifier, ClientConfig, StatusPolicy};

#[derive(Debug, Parser)]
#[command(name = "watchskip")]
#[command(about = "Ask the watch-or-skip predictor about a YouTube video")]
#[command(version)]
pub struct Cli {
    /// Video URL to analyze; reads one URL per line from stdin when omitted
    pub url: Option<String>,

    /// Base URL of the prediction service
    #[arg(long, env = "WATCHSKIP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "WATCHSKIP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Wait for the predictor indefinitely
    #[arg(long)]
    pub no_timeout: bool,

    /// Treat non-2xx responses as failures even if the body decodes
    #[arg(long)]
    pub strict_status: bool,

    /// How the decision label picks the panel style
    #[arg(long, value_enum, default_value_t = ClassifierArg::Substring)]
    pub classifier: ClassifierArg,

    /// Print the raw result as JSON instead of the panel
    #[arg(long)]
    pub json: bool,

    /// Probe the service root and exit
    #[arg(long)]
    pub check: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierArg {
    /// Label contains "watch"
    Substring,
    /// Label starts with "watch" or "skip"
    Enumerated,
}

impl From<ClassifierArg> for Classifier {
    fn from(arg: ClassifierArg) -> Self {
        match arg {
            ClassifierArg::Substring => Classifier::Substring,
            ClassifierArg::Enumerated => Classifier::Enumerated,
        }
    }
}

impl Cli {
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: (!self.no_timeout).then(|| Duration::from_secs(self.timeout_secs)),
            status_policy: if self.strict_status {
                StatusPolicy::RequireSuccess
            } else {
                StatusPolicy::Ignore
            },
            classifier: self.classifier.into(),
        }
    }
}
