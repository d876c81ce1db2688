//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use rapport_domain::{OutputFormat, PreferredContact};
use std::path::PathBuf;

/// Output format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Human-readable terminal output
    Text,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Contact preference flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContactArg {
    Email,
    Sms,
    None,
}

impl From<ContactArg> for PreferredContact {
    fn from(arg: ContactArg) -> Self {
        match arg {
            ContactArg::Email => PreferredContact::Email,
            ContactArg::Sms => PreferredContact::Sms,
            ContactArg::None => PreferredContact::None,
        }
    }
}

/// CLI arguments for rapport
#[derive(Parser, Debug)]
#[command(name = "rapport")]
#[command(author, version, about = "Pre-counseling mental health screening")]
#[command(long_about = r#"
Rapport runs a short text conversation with the screening backend and
produces a pre-counseling report (depression, anxiety and stress scores
plus a risk level). It is a reference for counseling, not a diagnosis.

Configuration files are loaded from (in priority order):
1. RAPPORT_API_BASE    Environment override for the backend URL
2. --config <path>     Explicit config file
3. ./rapport.toml      Project-level config
4. ~/.config/rapport/config.toml   Global config

Example:
  rapport
  rapport counselors --specialty 불안장애
  rapport profile show
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Screening backend URL (overrides configuration)
    #[arg(long, value_name = "URL", global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run an interactive screening (default)
    Screen,

    /// Browse the counselor directory
    Counselors {
        /// Only counselors with this area of expertise ("전체" for all)
        #[arg(short, long)]
        specialty: Option<String>,

        /// Keyword matched against name, title, expertise and focus
        #[arg(short = 'k', long)]
        search: Option<String>,

        /// List the available specialties instead
        #[arg(long)]
        specialties: bool,
    },

    /// Show one counselor in detail
    Counselor {
        /// Counselor id, e.g. hana-park
        id: String,
    },

    /// Send an inquiry to a counselor
    Inquiry {
        /// Counselor id
        id: String,

        /// Inquiry text
        #[arg(short, long)]
        message: String,

        /// Area of interest (defaults to the counselor's first expertise)
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Manage the locally stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    /// Show the current profile
    Show,

    /// Change profile fields
    Set(ProfileUpdate),

    /// Remove the stored profile
    Clear,

    /// Create a local account
    Signup(SignUpArgs),

    /// Log in with the stored account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Do not store the password
        #[arg(long)]
        no_remember: bool,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub goal: Option<String>,

    #[arg(long)]
    pub memo: Option<String>,

    #[arg(long, value_enum)]
    pub contact: Option<ContactArg>,

    #[arg(long, value_name = "BOOL")]
    pub session_summary: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub weekly_tips: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub emergency_alerts: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SignUpArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub phone: String,

    /// One of 정기 자가점검, 상담 준비, 불안·우울 관리, 스트레스 관리
    #[arg(long, default_value = "정기 자가점검")]
    pub goal: String,

    #[arg(long, value_enum, default_value = "email")]
    pub contact: ContactArg,

    /// Receive weekly tips
    #[arg(long)]
    pub marketing: bool,

    /// Decline the terms of service
    #[arg(long)]
    pub decline_terms: bool,
}
