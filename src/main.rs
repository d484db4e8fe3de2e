//! QuizGen - quiz generation wizard
//!
//! Without arguments the terminal wizard starts. With arguments the wizard
//! is filled from the command line, the quiz is printed and optionally
//! exported.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use quizgen::{
    AppConfig, Cli, MockGenerator, QuizDocument, QuizGenerator, TuiApp, display_quiz,
    export_to_dir, generate_blocking, init_locale, should_run_interactive,
};
use cli_output::Tone;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize i18n for this binary
rust_i18n::i18n!("locales", fallback = "en");

// CLI Output Module
mod cli_output {
    //! 命令行输出样式
    //!
    //! 状态行统一为“图标 + 文本”，颜色按语气区分。

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    const RULE_WIDTH: usize = 60;

    /// 状态语气
    #[derive(Debug, Clone, Copy)]
    pub enum Tone {
        Success,
        Warning,
        Error,
        Hint,
    }

    impl Tone {
        fn icon(self) -> &'static str {
            match self {
                Tone::Success => "✓ ",
                Tone::Warning => "⚠ ",
                Tone::Error => "✗ ",
                Tone::Hint => "→ ",
            }
        }

        fn color(self) -> Color {
            match self {
                Tone::Success => Color::Green,
                Tone::Warning => Color::Yellow,
                Tone::Error => Color::Red,
                Tone::Hint => Color::DarkGrey,
            }
        }
    }

    /// 打印一行状态
    pub fn status(tone: Tone, msg: &str) {
        let _ = stdout().execute(Print(style(tone.icon()).with(tone.color()).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// 分隔线
    pub fn rule() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(RULE_WIDTH))));
    }

    /// 居中的小节标题
    pub fn heading(title: &str) {
        let padding = RULE_WIDTH.saturating_sub(title.chars().count()) / 2;
        let _ = stdout().execute(Print(format!("\n{}", " ".repeat(padding))));
        let _ = stdout().execute(Print(title.bold().with(Color::Cyan)));
        let _ = stdout().execute(Print("\n\n"));
    }

    /// 缩进的键值行
    pub fn field(key: &str, value: &str) {
        let _ = stdout().execute(Print(format!("  {}: ", style(key).with(Color::DarkGrey))));
        let _ = stdout().execute(Print(style(value).bold()));
        let _ = stdout().execute(Print("\n"));
    }

    /// 日志文件位置
    pub fn log_path(label: &str, path: &str) {
        let _ = stdout().execute(Print(style("\n  📁 ").with(Color::Cyan)));
        let _ = stdout().execute(Print(style(format!("{}: ", label)).with(Color::DarkGrey)));
        let _ = stdout().execute(Print(format!("{}\n", path)));
    }
}

/// Convenience macro for translation
macro_rules! t {
    ($key:expr) => {
        rust_i18n::t!($key)
    };
    ($key:expr, $($tt:tt)*) => {
        rust_i18n::t!($key, $($tt)*)
    };
}

fn main() -> Result<ExitCode> {
    // Check if we should run in interactive mode
    if should_run_interactive() {
        run_interactive_mode()?;
        return Ok(ExitCode::SUCCESS);
    }

    // Standard CLI mode
    run_cli_mode()
}

/// Run in interactive mode with Ratatui TUI
fn run_interactive_mode() -> Result<()> {
    // Get executable directory first for log path
    let exe_dir = get_executable_dir()?;
    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("Interactive_{}.log", timestamp));

    // Setup file-only logging before TUI starts
    let _guard = setup_logging(&log_path, LogOutput::FileOnly)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "QuizGen starting in interactive mode"
    );

    // no arguments, but environment overrides such as QUIZGEN_LANG still apply
    let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME")]).unwrap_or_default();
    let config = load_config(&cli, &exe_dir)?;
    init_locale(config.language.as_deref());

    let generator: Arc<dyn QuizGenerator> =
        Arc::new(MockGenerator::new(config.generation.delay()));
    let mut app = TuiApp::new(config, generator)?;
    app.set_log_path(log_path.clone());
    app.run()?;

    info!(log_file = %log_path.display(), "Interactive session complete");
    Ok(())
}

/// Run in standard CLI mode
///
/// Failures map to an exit code; the log guard has to drop before the
/// process ends.
fn run_cli_mode() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Get the executable directory for Config and Log directories
    let exe_dir = get_executable_dir()?;

    // Determine log file path based on config file or timestamp
    let log_path = get_log_path(&exe_dir, &cli);

    // Setup logging
    let _guard = setup_logging(
        &log_path,
        LogOutput::Console {
            verbose: cli.verbose,
            json: cli.json_log,
        },
    )?;

    info!(version = env!("CARGO_PKG_VERSION"), "QuizGen starting");

    let config = load_config(&cli, &exe_dir)?;
    init_locale(config.language.as_deref());

    if cli.verbose {
        info!(?config, "Configuration loaded");
    }
    info!(log_file = %log_path.display(), "Log file location");

    if let Some(ref path) = cli.write_config {
        // defaults are written as the commented sample
        if config == AppConfig::default() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, AppConfig::sample_config())?;
        } else {
            config.save_to_file(path)?;
        }
        cli_output::status(Tone::Success, &t!("cli_config_written", path = path.display()));
        return Ok(ExitCode::SUCCESS);
    }

    let mut wizard = match cli.fill_wizard(&config) {
        Ok(wizard) => wizard,
        Err(e) => {
            error!(error = %e, "Wizard input rejected");
            cli_output::status(Tone::Error, &e.to_string());
            cli_output::status(Tone::Hint, &t!("cli_usage_hint"));
            return Ok(ExitCode::from(2));
        }
    };

    if !wizard.youtube_url.trim().is_empty()
        && quizgen::quiz::youtube_video_id(wizard.youtube_url.trim()).is_none()
    {
        cli_output::status(Tone::Warning, &t!("youtube_invalid"));
    }

    cli_output::status(Tone::Hint, &t!("generating_status", n = wizard.total_questions()));
    let generator: Arc<dyn QuizGenerator> =
        Arc::new(MockGenerator::new(config.generation.delay()));
    if let Err(e) = generate_blocking(&mut wizard, generator, &config) {
        error!(error = %e, "Generation failed");
        cli_output::status(Tone::Error, &t!("cli_generation_failed", error = e));
        return Ok(ExitCode::FAILURE);
    }

    let doc = QuizDocument::new(&wizard.title, &wizard.description, wizard.generated.clone());
    display_quiz(&doc, cli.include_answers);

    if cli.wants_export() {
        let exporter = config.export.format.exporter(config.export.questions_per_page);
        cli_output::heading(&t!("cli_export_title"));
        match export_to_dir(
            exporter.as_ref(),
            &config.export.output_dir,
            &doc,
            cli.include_answers,
        ) {
            Ok(path) => {
                cli_output::status(Tone::Success, &t!("export_saved", path = path.display()));
                cli_output::field(
                    &t!("cli_export_format"),
                    config.export.format.extension(),
                );
            }
            Err(e) => {
                error!(error = %e, "Export failed");
                cli_output::status(Tone::Error, &t!("export_failed", error = e));
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    cli_output::rule();
    cli_output::log_path(&t!("log_file"), &log_path.display().to_string());
    info!(log_file = %log_path.display(), "Quiz complete. Log saved to");

    Ok(ExitCode::SUCCESS)
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path based on config file or timestamp
fn get_log_path(exe_dir: &Path, cli: &Cli) -> PathBuf {
    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    if let Some(config_name) = cli.config_name() {
        let config_log_dir = log_dir.join(&config_name);
        let log_filename = format!("{}_{}.log", config_name, timestamp);
        config_log_dir.join(log_filename)
    } else {
        let log_filename = format!("CLIRun_{}.log", timestamp);
        log_dir.join(log_filename)
    }
}

/// Resolve config path - supports shorthand syntax
fn resolve_config_path(exe_dir: &Path, config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    let with_extension = if config_path.extension().is_none() {
        config_path.with_extension("toml")
    } else {
        config_path.to_path_buf()
    };

    if with_extension.exists() {
        return with_extension;
    }

    let config_dir = exe_dir.join("Config");
    let filename = config_path.file_name().unwrap_or(config_path.as_os_str());

    let mut in_config_dir = config_dir.join(filename);
    if in_config_dir.extension().is_none() {
        in_config_dir = in_config_dir.with_extension("toml");
    }

    if in_config_dir.exists() {
        return in_config_dir;
    }

    config_path.to_path_buf()
}

/// Load configuration from `--config`, `<exe_dir>/Config/quizgen.toml` or defaults
fn load_config(cli: &Cli, exe_dir: &Path) -> Result<AppConfig> {
    let path = match cli.config {
        Some(ref config_path) => {
            let resolved = resolve_config_path(exe_dir, config_path);
            if !resolved.exists() {
                anyhow::bail!("{}", t!("cli_config_not_found", path = resolved.display()));
            }
            Some(resolved)
        }
        None => {
            let default_path = exe_dir.join("Config").join("quizgen.toml");
            default_path.exists().then_some(default_path)
        }
    };

    let file_config = match path {
        Some(path) => {
            info!(config_file = %path.display(), "Loading configuration from file");
            AppConfig::load_from_file(&path)?
        }
        None => AppConfig::default(),
    };

    let config = cli.merge_with_config(file_config);
    config.validate()?;
    Ok(config)
}

/// Where log records go besides the log file
#[derive(Debug, Clone, Copy)]
enum LogOutput {
    /// File only; the TUI owns the terminal
    FileOnly,
    /// File plus stderr, the file optionally as JSON
    Console { verbose: bool, json: bool },
}

/// Install the global subscriber writing to `log_path`
fn setup_logging(log_path: &Path, output: LogOutput) -> Result<WorkerGuard> {
    let level = match output {
        LogOutput::Console { verbose: true, .. } => Level::DEBUG,
        _ => Level::INFO,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let registry = tracing_subscriber::registry().with(env_filter);
    match output {
        LogOutput::FileOnly => registry
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init(),
        LogOutput::Console { json: true, .. } => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogOutput::Console { json: false, .. } => registry
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    Ok(guard)
}
