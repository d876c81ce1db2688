//! CLI entrypoint for rapport
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use rapport_application::{CounselorDirectory, ProfileService, SignUpForm};
use rapport_domain::{NotificationSettings, OutputFormat};
use rapport_infrastructure::{ConfigLoader, FileConfig, HttpScreeningGateway, JsonFileProfileStore};
use rapport_presentation::{
    Cli, Command, OutputConfig, OutputFormatter, ProfileAction, ProfileUpdate, ReplConfig,
    ScreeningRepl, SignUpArgs, formatter_for,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(base) = &cli.api_base {
        config.api.base_url = base.clone();
    }
    config.validate()?;
    debug!("Using screening backend {}", config.api.normalized_base_url());

    let output = OutputConfig {
        format: cli
            .output
            .map(OutputFormat::from)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };
    output.apply_color();
    let formatter = formatter_for(output.format);

    info!("Starting rapport");

    match cli.command.clone().unwrap_or(Command::Screen) {
        Command::Screen => run_screen(&cli, &config, &output).await,
        Command::Counselors {
            specialty,
            search,
            specialties,
        } => {
            let directory = CounselorDirectory::default();
            if specialties {
                for specialty in directory.specialties() {
                    println!("{}", specialty);
                }
            } else {
                let matched = directory.filter(specialty.as_deref(), search.as_deref());
                print!("{}", formatter.format_counselor_list(&matched));
            }
            Ok(())
        }
        Command::Counselor { id } => {
            let directory = CounselorDirectory::default();
            let counselor = directory
                .find(&id)
                .with_context(|| format!("상담사를 찾을 수 없습니다: {}", id))?;
            println!("{}", formatter.format_counselor(counselor));
            Ok(())
        }
        Command::Inquiry { id, message, topic } => {
            let directory = CounselorDirectory::default();
            let inquiry = directory.inquiry(&id, topic.as_deref(), &message)?;
            info!("Inquiry prepared for {} ({})", inquiry.counselor_id, inquiry.topic);
            if let Some(counselor) = directory.find(&inquiry.counselor_id) {
                println!("{}", formatter.format_inquiry(counselor, &inquiry));
            }
            Ok(())
        }
        Command::Profile { action } => run_profile(action, &config, formatter.as_ref()),
    }
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over the `-v` count. With a log file, events go through a
/// non-blocking writer whose guard must outlive `main`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

async fn run_screen(cli: &Cli, config: &FileConfig, output: &OutputConfig) -> Result<()> {
    // === Dependency Injection ===
    let gateway = Arc::new(HttpScreeningGateway::new(config.api.normalized_base_url()));

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config
            .repl
            .history_file
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join("rapport").join("history.txt"))),
    };

    let mut repl = ScreeningRepl::new(gateway, repl_config).with_output(output.format);
    repl.run().await?;
    Ok(())
}

fn run_profile(
    action: ProfileAction,
    config: &FileConfig,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let store = JsonFileProfileStore::at_or_default(config.profile.path.as_deref())
        .context("Could not determine where to store the profile; set [profile] path")?;
    debug!("Profile store at {}", store.path().display());
    let service = ProfileService::new(Arc::new(store));

    match action {
        ProfileAction::Show => {
            println!("{}", formatter.format_profile(&service.current()));
        }
        ProfileAction::Set(update) => {
            if update.is_empty() {
                bail!("Nothing to change. See `rapport profile set --help`.");
            }
            let profile = service.update(|p| apply_update(p, update));
            println!("{}", formatter.format_profile(&profile));
            println!("변경사항을 로컬에 저장했어요.");
        }
        ProfileAction::Clear => {
            let profile = service.reset();
            println!("로컬에 저장된 계정을 모두 비웠어요.");
            println!("{}", formatter.format_profile(&profile));
        }
        ProfileAction::Signup(args) => {
            let profile = service.sign_up(&sign_up_form(args))?;
            println!("{}", formatter.format_profile(&profile));
            println!("가입 정보가 이 기기에 저장되었습니다.");
        }
        ProfileAction::Login {
            email,
            password,
            no_remember,
        } => {
            let (profile, outcome) = service.log_in(&email, &password, !no_remember)?;
            println!("{}", formatter.format_login(&profile, outcome));
        }
    }
    Ok(())
}

fn apply_update(profile: &mut rapport_domain::UserProfile, update: ProfileUpdate) {
    if let Some(name) = update.name {
        profile.name = name;
    }
    if let Some(email) = update.email {
        profile.email = email;
    }
    if let Some(phone) = update.phone {
        profile.phone = Some(phone);
    }
    if let Some(goal) = update.goal {
        profile.goal = Some(goal);
    }
    if let Some(memo) = update.memo {
        profile.memo = Some(memo);
    }
    if let Some(contact) = update.contact {
        profile.preferred_contact = contact.into();
    }
    let NotificationSettings {
        session_summary,
        weekly_tips,
        emergency_alerts,
    } = profile.notifications;
    profile.notifications = NotificationSettings {
        session_summary: update.session_summary.unwrap_or(session_summary),
        weekly_tips: update.weekly_tips.unwrap_or(weekly_tips),
        emergency_alerts: update.emergency_alerts.unwrap_or(emergency_alerts),
    };
}

fn sign_up_form(args: SignUpArgs) -> SignUpForm {
    SignUpForm {
        name: args.name,
        email: args.email,
        password: args.password,
        phone: args.phone,
        goal: args.goal,
        preferred_contact: args.contact.into(),
        accept_terms: !args.decline_terms,
        accept_marketing: args.marketing,
    }
}
