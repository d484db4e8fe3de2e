//! QuizGen - quiz generation wizard
//!
//! This library turns learning material into quiz questions:
//! - A step-gated wizard for topic, material and question configuration
//! - A one-screen quick quiz for a single topic
//! - Pluggable question generators with a built-in mock
//! - Markdown and JSON export with optional answer keys
//! - Interactive terminal UI and a scriptable command line mode

// Initialize i18n with locale files
rust_i18n::i18n!("locales", fallback = "en");

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod i18n;
pub mod quick;
pub mod quiz;
pub mod tui;
pub mod wizard;

pub use cli::{Cli, generate_blocking};
pub use config::{AppConfig, ConfigError, ExportSettings, GenerationSettings, UploadPolicy};
pub use error::{Error, Result};
pub use export::{ExportFormat, QuizDocument, QuizExporter, export_to_dir};
pub use generation::{GenerationError, GenerationJob, GenerationRequest, MockGenerator, QuizGenerator};
pub use i18n::init_locale;
pub use quick::{QuickQuiz, QuickType};
pub use quiz::{Difficulty, Question, QuestionConfig, QuestionType, UploadedFile};
pub use tui::{TuiApp, display_quiz, should_run_interactive};
pub use wizard::{Action, WizardState, WizardStep};
