use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ChatFeedbackRequester, SessionLoopService};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_BANK: &str = "prompts/question_bank.json";
const DEFAULT_CATEGORY: &str = "data_analyst";
const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

struct DesktopApp {
    category: String,
    session_loop: Arc<SessionLoopService>,
}

impl UiApp for DesktopApp {
    fn category(&self) -> String {
        self.category.clone()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    bank: PathBuf,
    category: String,
    output_dir: PathBuf,
    verbose: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path>] [--category <name>] [--out <dir>] [--verbose]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank {DEFAULT_BANK}");
    eprintln!("  --category {DEFAULT_CATEGORY}");
    eprintln!("  --out {DEFAULT_OUTPUT_DIR}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COACH_QUESTION_BANK, COACH_CATEGORY, COACH_OUTPUT_DIR");
    eprintln!("  OPENAI_API_KEY, COACH_AI_BASE_URL, COACH_AI_MODEL");
    eprintln!("  COACH_LOG (falls back to RUST_LOG)");
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let env_or = |key: &str, default: &str| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let mut parsed = Self {
            bank: PathBuf::from(env_or("COACH_QUESTION_BANK", DEFAULT_BANK)),
            category: env_or("COACH_CATEGORY", DEFAULT_CATEGORY),
            output_dir: PathBuf::from(env_or("COACH_OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
            verbose: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => parsed.bank = PathBuf::from(require_value(args, "--bank")?),
                "--category" => parsed.category = require_value(args, "--category")?,
                "--out" => parsed.output_dir = PathBuf::from(require_value(args, "--out")?),
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Run(parsed))
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("COACH_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    init_logging(parsed.verbose);

    // Load the bank before opening a window; a missing or empty bank is fatal.
    let storage = Storage::files(&parsed.bank, &parsed.output_dir);
    let feedback = ChatFeedbackRequester::from_env();
    if !feedback.enabled() {
        tracing::warn!("OPENAI_API_KEY is not set; submissions will report an error");
    }
    let services = AppServices::load(&storage, &parsed.category, Arc::new(feedback)).await?;
    tracing::info!(
        bank = %parsed.bank.display(),
        category = %parsed.category,
        questions = services.bank().count(),
        output_dir = %parsed.output_dir.display(),
        "interview coach ready"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        category: parsed.category,
        session_loop: services.session_loop(),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(ui::app::WINDOW_TITLE)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
