//! REPL (Read-Eval-Print Loop) for an interactive screening
//!
//! Walks through the three screens: the consent form, the chat and the
//! report. Chat text is never written to the line history.

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use crate::output::{OutputFormatter, formatter_for};
use crate::progress::ProgressMode;
use colored::Colorize;
use rapport_application::{FlowError, ScreeningFlow, ScreeningGateway};
use rapport_domain::{
    AgeGroup, Choice, ConsentField, ConsentInput, Gender, Occupation, OutputFormat, Screen,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Slash commands available in the chat and report screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Done,
    Reset,
    Progress,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// `None` when the line is not a command
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        Some(match line {
            "/done" | "/완료" => ReplCommand::Done,
            "/reset" | "/restart" => ReplCommand::Reset,
            "/progress" | "/p" => ReplCommand::Progress,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Interpret one answer to a numbered choice prompt
///
/// Accepts the option number, its value or its label. A blank answer keeps
/// `current`.
pub fn parse_choice_answer<C: Choice>(answer: &str, current: Option<C>) -> Result<C, String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return current.ok_or_else(|| format!("{}을(를) 선택해 주세요.", C::FIELD.label()));
    }
    if let Ok(n) = answer.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| C::ALL.get(i))
            .copied()
            .ok_or_else(|| format!("1에서 {} 사이의 번호를 입력해 주세요.", C::ALL.len()));
    }
    C::ALL
        .iter()
        .copied()
        .find(|c| c.label() == answer)
        .map(Ok)
        .unwrap_or_else(|| C::parse_choice(answer).map_err(|e| e.to_string()))
}

enum Flow {
    Continue,
    Quit,
}

/// Tracks whether the current report has already been printed
///
/// Re-entering the report screen after an interrupted prompt must not print
/// the report again; leaving the screen re-arms it.
#[derive(Debug, Default)]
struct ReportLatch {
    shown: bool,
}

impl ReportLatch {
    /// `true` exactly once per visit to the report screen
    fn should_print(&mut self, screen: Screen) -> bool {
        if screen != Screen::Report {
            self.shown = false;
            return false;
        }
        !std::mem::replace(&mut self.shown, true)
    }
}

/// Interactive screening REPL
pub struct ScreeningRepl<G: ScreeningGateway + 'static> {
    flow: ScreeningFlow<G>,
    config: ReplConfig,
    formatter: Box<dyn OutputFormatter>,
    report_latch: ReportLatch,
}

impl<G: ScreeningGateway + 'static> ScreeningRepl<G> {
    pub fn new(gateway: Arc<G>, config: ReplConfig) -> Self {
        let progress =
            ProgressMode::select(config.show_progress, std::io::stderr().is_terminal()).reporter();
        Self {
            flow: ScreeningFlow::new(gateway).with_progress(progress),
            config,
            formatter: formatter_for(OutputFormat::Text),
            report_latch: ReportLatch::default(),
        }
    }

    /// Set the format used to print the report
    pub fn with_output(mut self, format: OutputFormat) -> Self {
        self.formatter = formatter_for(format);
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path: Option<PathBuf> = self.config.history_file.clone();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let print_report = self.report_latch.should_print(self.flow.screen());
            let step = match self.flow.screen() {
                Screen::Consent => self.consent_step(&mut rl).await,
                Screen::Chat => self.chat_step(&mut rl).await,
                Screen::Report => self.report_step(&mut rl, print_report),
            };
            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) | Err(ReadlineError::Eof) => {
                    println!("안녕히 가세요.");
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│      라포 - AI 기반 심리 상태 사전 점검      │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /done, /완료        - 대화를 마치고 리포트 보기");
        println!("  /progress, /p       - 진행 상황 보기");
        println!("  /reset              - 처음 화면으로");
        println!("  /help, /h, /?       - 도움말");
        println!("  /quit, /exit, /q    - 종료");
        println!();
    }

    // ==================== Consent ====================

    async fn consent_step(&mut self, rl: &mut DefaultEditor) -> RlResult<Flow> {
        println!("{}", ConsoleFormatter::consent_intro());

        let current = self.flow.state().consent.clone();
        let Some(gender) = Self::prompt_choice::<Gender>(rl, current.gender)? else {
            return Ok(Flow::Quit);
        };
        let Some(age_group) = Self::prompt_choice::<AgeGroup>(rl, current.age_group)? else {
            return Ok(Flow::Quit);
        };
        let Some(occupation) = Self::prompt_choice::<Occupation>(rl, current.occupation)? else {
            return Ok(Flow::Quit);
        };
        let region_hint = if ConsentField::Region.is_required() {
            ""
        } else {
            " (선택, Enter로 건너뛰기)"
        };
        let region = rl.readline(&format!("{}{}: ", ConsentField::Region, region_hint))?;
        if region.trim() == "/quit" {
            return Ok(Flow::Quit);
        }

        let consent =
            ConsentInput::new(gender, age_group, occupation).with_region(region.trim().to_string());
        let draft = consent.clone();
        if let Err(e) = self.flow.update_consent(move |c| *c = draft) {
            debug!("Consent edit refused: {}", e);
        }

        println!("{}", ConsoleFormatter::consent_summary(&consent));
        let answer = rl.readline("동의하고 시작할까요? [Y/n]: ")?;
        if matches!(answer.trim().to_lowercase().as_str(), "n" | "no" | "아니오") {
            return Ok(Flow::Continue);
        }

        match self.flow.start_session(consent).await {
            Ok(()) => println!(),
            Err(e) => Self::print_flow_error(&e),
        }
        Ok(Flow::Continue)
    }

    /// Numbered prompt for one consent field; `None` means quit
    fn prompt_choice<C: Choice>(rl: &mut DefaultEditor, current: Option<C>) -> RlResult<Option<C>> {
        println!();
        let marker = if C::FIELD.is_required() { "*" } else { "" };
        println!("{} {}", C::FIELD.label().bold(), marker.red());
        for (i, option) in C::ALL.iter().enumerate() {
            println!("  {}. {}", i + 1, option.label());
        }

        let prompt = match current {
            Some(c) => format!("선택 [{}]: ", c.label()),
            None => "선택: ".to_string(),
        };

        loop {
            let answer = rl.readline(&prompt)?;
            if answer.trim() == "/quit" {
                return Ok(None);
            }
            match parse_choice_answer(&answer, current) {
                Ok(choice) => {
                    let _ = rl.add_history_entry(answer.trim());
                    return Ok(Some(choice));
                }
                Err(message) => println!("{}", message.yellow()),
            }
        }
    }

    // ==================== Chat ====================

    async fn chat_step(&mut self, rl: &mut DefaultEditor) -> RlResult<Flow> {
        if self.flow.state().messages.is_empty() {
            println!("{}", ConsoleFormatter::greeting());
            println!("{}", ConsoleFormatter::chat_footer());
            println!();
        }
        if self.config.show_progress {
            println!("{}", ConsoleFormatter::progress(&self.flow.progress()));
        }

        let line = rl.readline("> ")?;
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(command) = ReplCommand::parse(&line) {
            let _ = rl.add_history_entry(line.trim());
            return Ok(self.handle_command(command).await);
        }

        match self.flow.send_message(&line).await {
            Ok(()) => {
                if let Some(reply) = self.flow.state().messages.last() {
                    println!("{}", ConsoleFormatter::message(reply));
                }
                println!();
            }
            Err(e) => Self::print_flow_error(&e),
        }
        Ok(Flow::Continue)
    }

    async fn handle_command(&mut self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Done => {
                if let Err(e) = self.flow.finalize().await {
                    Self::print_flow_error(&e);
                }
            }
            ReplCommand::Reset => {
                self.flow.reset();
                println!("{}", "처음 화면으로 돌아갑니다.".dimmed());
            }
            ReplCommand::Progress => {
                println!("{}", ConsoleFormatter::progress(&self.flow.progress()));
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Quit => return Flow::Quit,
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        Flow::Continue
    }

    // ==================== Report ====================

    fn report_step(&mut self, rl: &mut DefaultEditor, print_report: bool) -> RlResult<Flow> {
        if print_report && let Some(report) = &self.flow.state().report {
            println!("{}", self.formatter.format_report(report));
        }

        loop {
            let line = rl.readline("처음 화면으로 돌아가려면 /reset, 종료하려면 /quit: ")?;
            match ReplCommand::parse(&line) {
                Some(ReplCommand::Reset) => {
                    self.flow.reset();
                    return Ok(Flow::Continue);
                }
                Some(ReplCommand::Quit) => return Ok(Flow::Quit),
                _ => continue,
            }
        }
    }

    fn print_flow_error(error: &FlowError) {
        match error.user_notice() {
            Some(notice) => eprintln!("{} {}", "x".red(), notice.red()),
            None if error.is_blocked() => println!("{}", error.to_string().dimmed()),
            None => debug!("Ignored: {}", error),
        }
    }
}
