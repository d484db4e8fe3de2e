//! Quiz domain types
//!
//! Value types shared by the wizard, the generator boundary, the exporters
//! and the UI: question types, difficulty levels, configuration entries,
//! generated questions and uploaded-file metadata.

use regex::Regex;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

/// A closed set of options that can be cycled through in the UI
pub trait EnumOption: Copy + Sized + PartialEq + 'static {
    /// All variants in display order
    fn variants() -> &'static [Self];

    /// Position of this variant in [`EnumOption::variants`]
    fn to_index(self) -> usize {
        Self::variants()
            .iter()
            .position(|v| *v == self)
            .unwrap_or(0)
    }

    /// Variant at `index`, wrapping around
    fn from_index(index: usize) -> Self {
        let variants = Self::variants();
        variants[index % variants.len()]
    }

    /// Next variant, wrapping around
    fn next(self) -> Self {
        Self::from_index(self.to_index() + 1)
    }

    /// Previous variant, wrapping around
    fn prev(self) -> Self {
        let len = Self::variants().len();
        Self::from_index(self.to_index() + len - 1)
    }
}

/// Kind of quiz question
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Four options, one correct
    #[default]
    MultipleChoice,
    /// Open answer with a model answer
    Essay,
    /// Sentence with a blank to fill in
    FillBlank,
    /// Statement to judge as true or false
    TrueFalse,
}

impl QuestionType {
    /// Stable identifier used on the command line and in files
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::Essay => "essay",
            QuestionType::FillBlank => "fill-blank",
            QuestionType::TrueFalse => "true-false",
        }
    }
}

impl EnumOption for QuestionType {
    fn variants() -> &'static [Self] {
        &[
            QuestionType::MultipleChoice,
            QuestionType::Essay,
            QuestionType::FillBlank,
            QuestionType::TrueFalse,
        ]
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple-choice" | "mc" => Ok(QuestionType::MultipleChoice),
            "essay" => Ok(QuestionType::Essay),
            "fill-blank" | "fill" => Ok(QuestionType::FillBlank),
            "true-false" | "tf" => Ok(QuestionType::TrueFalse),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

/// Difficulty level of a question
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Stable identifier used on the command line and in files
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl EnumOption for Difficulty {
    fn variants() -> &'static [Self] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Identity of a configuration entry, assigned at insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigId(pub u32);

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One requested block of questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub id: ConfigId,
    pub question_type: QuestionType,
    pub quantity: u32,
    pub difficulty: Difficulty,
}

impl QuestionConfig {
    /// Quantity given to new entries
    pub const DEFAULT_QUANTITY: u32 = 5;

    /// Largest quantity a single entry may request
    pub const MAX_QUANTITY: u32 = 100;

    /// Entry with default type, quantity and difficulty
    pub fn with_id(id: ConfigId) -> Self {
        Self {
            id,
            question_type: QuestionType::default(),
            quantity: Self::DEFAULT_QUANTITY,
            difficulty: Difficulty::default(),
        }
    }
}

/// A generated quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Present only for multiple-choice questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl Question {
    /// Index of the correct option, for multiple-choice questions
    pub fn correct_option_index(&self) -> Option<usize> {
        self.options
            .as_ref()
            .and_then(|opts| opts.iter().position(|o| *o == self.correct_answer))
    }
}

/// Letter label for an option index (`0 -> 'A'`)
pub fn option_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// Metadata of an uploaded learning-material file. Content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size_bytes,
        }
    }

    /// Lowercase extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Size for display, e.g. `2.00 MB`
    pub fn size_label(&self) -> String {
        format_size_mb(self.size_bytes)
    }
}

/// Format a byte count as megabytes with two decimals
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

static YOUTUBE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn youtube_pattern() -> &'static Regex {
    YOUTUBE_PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#].*)?$",
        )
        .expect("valid youtube regex")
    })
}

/// Extract the video id from a YouTube link
///
/// Returns `None` for anything that is not a recognizable YouTube video URL.
/// The wizard accepts any non-empty link; this only drives a UI warning.
pub fn youtube_video_id(url: &str) -> Option<String> {
    youtube_pattern()
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Localized name of a question type
pub fn question_type_label(question_type: QuestionType) -> Cow<'static, str> {
    match question_type {
        QuestionType::MultipleChoice => t!("type_multiple_choice"),
        QuestionType::Essay => t!("type_essay"),
        QuestionType::FillBlank => t!("type_fill_blank"),
        QuestionType::TrueFalse => t!("type_true_false"),
    }
}

/// Localized name of a difficulty
pub fn difficulty_label(difficulty: Difficulty) -> Cow<'static, str> {
    match difficulty {
        Difficulty::Easy => t!("difficulty_easy"),
        Difficulty::Medium => t!("difficulty_medium"),
        Difficulty::Hard => t!("difficulty_hard"),
    }
}

/// Heading for the answer line: "correct answer" for multiple choice,
/// "sample answer" for essays
pub fn answer_label(question_type: QuestionType) -> Cow<'static, str> {
    match question_type {
        QuestionType::MultipleChoice => t!("correct_answer"),
        QuestionType::Essay => t!("sample_answer"),
        QuestionType::FillBlank | QuestionType::TrueFalse => t!("answer"),
    }
}
