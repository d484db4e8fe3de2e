//! CLI argument parsing with clap

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::generation::{GenerationError, GenerationJob, QuizGenerator};
use crate::quiz::{Difficulty, QuestionConfig, QuestionType};
use crate::wizard::{
    Action, ConfigUpdate, Effect, WizardError, WizardState, WizardStep, read_upload,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Quiz Generator - turn learning material into a ready-to-use quiz
///
/// Run without arguments to open the interactive wizard. With arguments the
/// same wizard is driven non-interactively: the quiz is generated, printed
/// and optionally exported.
#[derive(Parser, Debug, Default)]
#[command(name = "quizgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// A bare name such as `biology` is looked up in the `Config` directory
    /// next to the executable. CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Write a sample configuration file to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,

    /// Quiz title (the topic)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Short description of the topic
    #[arg(short, long)]
    pub description: Option<String>,

    /// Learning material as plain text
    #[arg(short, long)]
    pub material: Option<String>,

    /// Read learning material text from a file
    #[arg(long, value_name = "PATH", conflicts_with = "material")]
    pub material_file: Option<PathBuf>,

    /// Material files to attach (PDF, DOC, DOCX, PPT, PPTX, TXT); repeatable
    #[arg(short, long = "upload", value_name = "PATH")]
    pub uploads: Vec<PathBuf>,

    /// YouTube video link used as material
    #[arg(short, long)]
    pub youtube: Option<String>,

    /// Question block as `type[:quantity[:difficulty]]`; repeatable
    ///
    /// Types: multiple-choice (mc), essay, fill-blank (fill), true-false (tf).
    /// Difficulties: easy, medium, hard. Defaults to `multiple-choice:5:medium`.
    #[arg(short, long = "question", value_name = "SPEC")]
    pub questions: Vec<String>,

    /// Export the quiz into this directory (implies --export)
    #[arg(short = 'o', long)]
    pub export_dir: Option<PathBuf>,

    /// Export the quiz into the configured directory
    #[arg(short = 'e', long)]
    pub export: bool,

    /// Export document format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Include the answer key in the export
    #[arg(short = 'a', long)]
    pub include_answers: bool,

    /// UI language (en, id)
    #[arg(short, long, env = "QUIZGEN_LANG")]
    pub lang: Option<String>,

    /// Simulated generation latency in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Give up on generation after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: AppConfig) -> AppConfig {
        if let Some(ref lang) = self.lang {
            config.language = Some(lang.clone());
        }
        if let Some(delay_ms) = self.delay_ms {
            config.generation.delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.generation.timeout_secs = timeout_secs;
        }
        if let Some(ref export_dir) = self.export_dir {
            config.export.output_dir = export_dir.clone();
        }
        if let Some(format) = self.format {
            config.export.format = format;
        }

        config
    }

    /// Whether the generated quiz should be written to disk
    pub fn wants_export(&self) -> bool {
        self.export || self.export_dir.is_some()
    }

    /// Parsed `--question` blocks; empty keeps the wizard's default plan
    pub fn question_plan(&self) -> Result<Vec<(QuestionType, u32, Difficulty)>> {
        self.questions.iter().map(|s| parse_question_spec(s)).collect()
    }

    /// Material text from `--material` or `--material-file`
    pub fn material_text(&self) -> Result<Option<String>> {
        if let Some(ref path) = self.material_file {
            return Ok(Some(std::fs::read_to_string(path)?));
        }
        Ok(self.material.clone())
    }

    /// Fill a wizard from the arguments and walk it to the configuration step
    ///
    /// Each step gate is enforced exactly as in the interactive wizard.
    pub fn fill_wizard(&self, config: &AppConfig) -> Result<WizardState> {
        let mut state = WizardState::new(config.uploads.clone());

        state.dispatch(Action::SetTitle(self.title.clone().unwrap_or_default()));
        state.dispatch(Action::SetDescription(
            self.description.clone().unwrap_or_default(),
        ));
        state.dispatch(Action::Advance);
        if state.step != WizardStep::Material {
            return Err(Error::MissingInput("a quiz title (--title)".into()));
        }

        if let Some(text) = self.material_text()? {
            state.dispatch(Action::SetMaterialText(text));
        }
        if let Some(ref url) = self.youtube {
            state.dispatch(Action::SetYoutubeUrl(url.clone()));
        }
        for path in &self.uploads {
            let file = read_upload(path)?;
            state.dispatch(Action::AddUpload(file));
            if let Some(WizardError::Upload(e)) = state.error.take() {
                return Err(Error::Upload(e));
            }
        }
        state.dispatch(Action::Advance);
        if state.step != WizardStep::Configuration {
            return Err(Error::MissingInput(
                "learning material (--material, --material-file, --upload or --youtube)".into(),
            ));
        }

        let plan = self.question_plan()?;
        if !plan.is_empty() {
            // replace the default entry with the requested blocks
            let default_id = state.configs.entries()[0].id;
            for (question_type, quantity, difficulty) in plan {
                state.dispatch(Action::AddConfig);
                let Some(id) = state.configs.entries().last().map(|c| c.id) else {
                    continue;
                };
                state.dispatch(Action::UpdateConfig(id, ConfigUpdate::Type(question_type)));
                state.dispatch(Action::UpdateConfig(id, ConfigUpdate::Quantity(quantity)));
                state.dispatch(Action::UpdateConfig(id, ConfigUpdate::Difficulty(difficulty)));
            }
            state.dispatch(Action::RemoveConfig(default_id));
        }

        Ok(state)
    }
}

/// Submit a wizard sitting on the configuration step and wait for the quiz
///
/// On success the wizard ends on the results step. A failed generation is
/// returned as an error and also left recorded in the wizard.
pub fn generate_blocking(
    state: &mut WizardState,
    generator: Arc<dyn QuizGenerator>,
    config: &AppConfig,
) -> Result<()> {
    let Some(Effect::Generate(request)) = state.dispatch(Action::Advance) else {
        return Err(Error::MissingInput("a complete question configuration".into()));
    };

    info!(questions = request.total_questions(), "Generating quiz");
    let outcome = GenerationJob::spawn(generator, request, config.generation.timeout()).wait();
    let failure = outcome.clone().err();
    state.dispatch(Action::GenerationFinished(outcome));

    match failure {
        Some(e) => Err(Error::Generation(e)),
        None if state.step == WizardStep::Results => Ok(()),
        None => Err(Error::Generation(GenerationError::Empty)),
    }
}

/// Parse `type[:quantity[:difficulty]]`
pub fn parse_question_spec(spec: &str) -> Result<(QuestionType, u32, Difficulty)> {
    let invalid = |message: String| Error::QuestionSpec {
        spec: spec.to_string(),
        message,
    };

    let mut parts = spec.split(':');
    let question_type: QuestionType = parts
        .next()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| invalid("missing question type".into()))?
        .parse()
        .map_err(invalid)?;

    let quantity = match parts.next() {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| (1..=QuestionConfig::MAX_QUANTITY).contains(q))
            .ok_or_else(|| {
                invalid(format!(
                    "quantity must be between 1 and {}, got '{}'",
                    QuestionConfig::MAX_QUANTITY,
                    raw
                ))
            })?,
        None => QuestionConfig::DEFAULT_QUANTITY,
    };

    let difficulty = match parts.next() {
        Some(raw) => raw.parse().map_err(invalid)?,
        None => Difficulty::default(),
    };

    if parts.next().is_some() {
        return Err(invalid("expected at most three ':'-separated parts".into()));
    }

    Ok((question_type, quantity, difficulty))
}
