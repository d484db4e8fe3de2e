//! Quiz document export
//!
//! Renders a generated quiz to a document and writes it to an export
//! directory. Two formats are supported: paginated Markdown for printing and
//! pretty JSON for other tools. Answers and explanations are only written
//! when requested.

use crate::error::{Error, Result};
use crate::quiz::{
    Difficulty, Question, QuestionType, answer_label, difficulty_label, option_letter,
    question_type_label,
};
use chrono::{DateTime, Local};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output document format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }

    /// Exporter for this format
    pub fn exporter(&self, questions_per_page: usize) -> Box<dyn QuizExporter> {
        match self {
            ExportFormat::Markdown => Box::new(MarkdownExporter::new(questions_per_page)),
            ExportFormat::Json => Box::new(JsonExporter),
        }
    }
}

/// A finished quiz ready to be exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDocument {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Local>,
}

impl QuizDocument {
    pub fn new(title: &str, description: &str, questions: Vec<Question>) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            questions,
            created_at: Local::now(),
        }
    }
}

/// Renders a [`QuizDocument`] into file contents
pub trait QuizExporter {
    fn format(&self) -> ExportFormat;

    fn render(&self, doc: &QuizDocument, include_answers: bool) -> Result<String>;
}

/// Markdown with a page break rule every `questions_per_page` questions
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    questions_per_page: usize,
}

impl MarkdownExporter {
    pub fn new(questions_per_page: usize) -> Self {
        Self {
            questions_per_page: questions_per_page.max(1),
        }
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new(5)
    }
}

impl QuizExporter for MarkdownExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, doc: &QuizDocument, include_answers: bool) -> Result<String> {
        if doc.questions.is_empty() {
            return Err(Error::EmptyExport);
        }

        // fmt::Write into a String cannot fail
        let mut out = String::new();
        let _ = writeln!(out, "# {}", doc.title);
        if !doc.description.is_empty() {
            let _ = writeln!(out, "\n{}", doc.description);
        }
        let _ = writeln!(
            out,
            "\n_{}_",
            t!(
                "export_meta",
                n = doc.questions.len(),
                date = doc.created_at.format("%Y-%m-%d %H:%M")
            )
        );

        for (i, q) in doc.questions.iter().enumerate() {
            if i > 0 && i % self.questions_per_page == 0 {
                let _ = writeln!(out, "\n---");
            }

            let _ = writeln!(
                out,
                "\n## {}. {}\n\n*{} · {}*",
                i + 1,
                q.text,
                question_type_label(q.question_type),
                difficulty_label(q.difficulty)
            );

            if let Some(options) = &q.options {
                out.push('\n');
                for (j, option) in options.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", option_letter(j), option);
                }
            }

            if include_answers {
                let answer_key = answer_label(q.question_type);
                let answer = match q.correct_option_index() {
                    Some(idx) => format!("{}. {}", option_letter(idx), q.correct_answer),
                    None => q.correct_answer.clone(),
                };
                let _ = writeln!(out, "\n**{}:** {}", answer_key, answer);
                if !q.explanation.is_empty() {
                    let _ = writeln!(out, "\n> **{}:** {}", t!("explanation"), q.explanation);
                }
            }
        }

        Ok(out)
    }
}

#[derive(Serialize)]
struct JsonQuestion<'a> {
    id: &'a str,
    text: &'a str,
    #[serde(rename = "type")]
    question_type: QuestionType,
    difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correct_answer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    description: &'a str,
    created_at: String,
    include_answers: bool,
    total_questions: usize,
    questions: Vec<JsonQuestion<'a>>,
}

/// Pretty-printed JSON
#[derive(Debug, Clone, Default)]
pub struct JsonExporter;

impl QuizExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, doc: &QuizDocument, include_answers: bool) -> Result<String> {
        if doc.questions.is_empty() {
            return Err(Error::EmptyExport);
        }

        let questions = doc
            .questions
            .iter()
            .map(|q| JsonQuestion {
                id: &q.id,
                text: &q.text,
                question_type: q.question_type,
                difficulty: q.difficulty,
                options: q.options.as_deref(),
                correct_answer: include_answers.then_some(q.correct_answer.as_str()),
                explanation: include_answers.then_some(q.explanation.as_str()),
            })
            .collect();

        let json = JsonDocument {
            title: &doc.title,
            description: &doc.description,
            created_at: doc.created_at.to_rfc3339(),
            include_answers,
            total_questions: doc.questions.len(),
            questions,
        };

        Ok(serde_json::to_string_pretty(&json)?)
    }
}

/// File-name friendly form of a title: lowercase ASCII words joined by `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "quiz".to_string()
    } else {
        slug.to_string()
    }
}

/// Render `doc` and write it into `dir`, returning the new file's path
///
/// File name: `<slug>_<questions|answer-key>_<YYYYmmdd_HHMMSS>.<ext>`.
/// The directory is created when missing.
pub fn export_to_dir(
    exporter: &dyn QuizExporter,
    dir: &Path,
    doc: &QuizDocument,
    include_answers: bool,
) -> Result<PathBuf> {
    let content = exporter.render(doc, include_answers)?;

    let kind = if include_answers {
        "answer-key"
    } else {
        "questions"
    };
    let file_name = format!(
        "{}_{}_{}.{}",
        slugify(&doc.title),
        kind,
        doc.created_at.format("%Y%m%d_%H%M%S"),
        exporter.format().extension()
    );
    let path = dir.join(file_name);

    let export_error = |e: std::io::Error| Error::Export {
        path: path.clone(),
        message: e.to_string(),
    };
    fs::create_dir_all(dir).map_err(export_error)?;
    fs::write(&path, content).map_err(export_error)?;

    info!(
        path = %path.display(),
        format = ?exporter.format(),
        include_answers,
        questions = doc.questions.len(),
        "Quiz exported"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_doc() -> QuizDocument {
        let questions = vec![
            Question {
                id: "1".into(),
                text: "Apa fungsi utama dari fotosintesis?".into(),
                question_type: QuestionType::MultipleChoice,
                options: Some(vec![
                    "Menghasilkan oksigen dan glukosa".into(),
                    "Menyerap air".into(),
                    "Mengeluarkan karbon dioksida".into(),
                    "Menghasilkan protein".into(),
                ]),
                correct_answer: "Menghasilkan oksigen dan glukosa".into(),
                explanation: "Fotosintesis mengubah cahaya menjadi energi kimia".into(),
                difficulty: Difficulty::Medium,
            },
            Question {
                id: "2".into(),
                text: "Jelaskan tahapan reaksi terang.".into(),
                question_type: QuestionType::Essay,
                options: None,
                correct_answer: "Reaksi terang terjadi di membran tilakoid".into(),
                explanation: "Tilakoid menyimpan klorofil".into(),
                difficulty: Difficulty::Hard,
            },
            Question {
                id: "3".into(),
                text: "Klorofil berwarna hijau.".into(),
                question_type: QuestionType::TrueFalse,
                options: None,
                correct_answer: "true".into(),
                explanation: "Klorofil memantulkan cahaya hijau".into(),
                difficulty: Difficulty::Easy,
            },
        ];
        QuizDocument::new("Fotosintesis: Bab 3", "Biologi kelas 8", questions)
    }

    #[test]
    fn test_markdown_without_answers_hides_them() {
        let doc = sample_doc();
        let md = MarkdownExporter::default().render(&doc, false).unwrap();

        assert!(md.starts_with("# Fotosintesis: Bab 3"));
        assert!(md.contains("A. Menghasilkan oksigen dan glukosa"));
        assert!(md.contains("D. Menghasilkan protein"));
        assert!(!md.contains("membran tilakoid"));
        assert!(!md.contains("Klorofil memantulkan"));
    }

    #[test]
    fn test_markdown_with_answers_shows_them() {
        let doc = sample_doc();
        let md = MarkdownExporter::default().render(&doc, true).unwrap();

        assert!(md.contains(&format!(
            "**{}:** A. Menghasilkan oksigen dan glukosa",
            t!("correct_answer")
        )));
        assert!(md.contains("membran tilakoid"));
        assert!(md.contains("Klorofil memantulkan cahaya hijau"));
    }

    #[test]
    fn test_markdown_paginates() {
        let doc = sample_doc();
        let one_per_page = MarkdownExporter::new(1).render(&doc, false).unwrap();
        assert_eq!(one_per_page.matches("\n---\n").count(), 2);

        let single_page = MarkdownExporter::new(5).render(&doc, false).unwrap();
        assert_eq!(single_page.matches("\n---\n").count(), 0);
    }

    #[test]
    fn test_json_omits_answers_unless_requested() {
        let doc = sample_doc();

        let hidden: serde_json::Value =
            serde_json::from_str(&JsonExporter.render(&doc, false).unwrap()).unwrap();
        assert_eq!(hidden["total_questions"], 3);
        assert!(hidden["questions"][0].get("correct_answer").is_none());
        assert!(hidden["questions"][0].get("explanation").is_none());
        assert_eq!(hidden["questions"][0]["options"].as_array().unwrap().len(), 4);
        assert!(hidden["questions"][1].get("options").is_none());

        let shown: serde_json::Value =
            serde_json::from_str(&JsonExporter.render(&doc, true).unwrap()).unwrap();
        assert_eq!(shown["questions"][2]["correct_answer"], "true");
        assert_eq!(shown["questions"][1]["type"], "essay");
    }

    #[test]
    fn test_empty_quiz_is_not_exported() {
        let doc = QuizDocument::new("Kosong", "", Vec::new());
        assert!(matches!(
            MarkdownExporter::default().render(&doc, false),
            Err(Error::EmptyExport)
        ));
        assert!(matches!(JsonExporter.render(&doc, true), Err(Error::EmptyExport)));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Fotosintesis: Bab 3"), "fotosintesis-bab-3");
        assert_eq!(slugify("  Sistem  Tata Surya!! "), "sistem-tata-surya");
        assert_eq!(slugify("???"), "quiz");
    }

    #[test]
    fn test_export_to_dir_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("exports");
        let doc = sample_doc();

        let path = export_to_dir(&MarkdownExporter::default(), &target, &doc, false).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("fotosintesis-bab-3_questions_"));
        assert!(name.ends_with(".md"));
        assert!(fs::read_to_string(&path).unwrap().contains("# Fotosintesis"));

        let key = export_to_dir(&JsonExporter, &target, &doc, true).unwrap();
        let name = key.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.contains("_answer-key_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_format_picks_exporter() {
        assert_eq!(ExportFormat::Json.exporter(5).format(), ExportFormat::Json);
        assert_eq!(ExportFormat::Markdown.extension(), "md");
    }
}
