//! Quick quiz
//!
//! The one-screen generator from the landing page: a topic, optional
//! material, one difficulty, one question type (or all of them) and a count.
//! The plan is turned into an ordinary [`GenerationRequest`], so it runs
//! through the same generator and job as the wizard.

use crate::generation::{GenerationError, GenerationRequest};
use crate::quiz::{Difficulty, EnumOption, Question, QuestionType};
use crate::wizard::QuestionConfigList;
use tracing::{debug, info, warn};

/// Counts offered by the quick form
pub const QUICK_COUNT_CHOICES: [u32; 5] = [3, 5, 10, 15, 20];

/// Question type choice; `All` spreads the count over every quick type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickType {
    #[default]
    All,
    MultipleChoice,
    FillBlank,
    TrueFalse,
}

impl QuickType {
    /// Question types a plan draws from, in order
    pub fn question_types(&self) -> &'static [QuestionType] {
        match self {
            QuickType::All => &[
                QuestionType::MultipleChoice,
                QuestionType::FillBlank,
                QuestionType::TrueFalse,
            ],
            QuickType::MultipleChoice => &[QuestionType::MultipleChoice],
            QuickType::FillBlank => &[QuestionType::FillBlank],
            QuickType::TrueFalse => &[QuestionType::TrueFalse],
        }
    }
}

impl EnumOption for QuickType {
    fn variants() -> &'static [Self] {
        &[
            QuickType::All,
            QuickType::MultipleChoice,
            QuickType::FillBlank,
            QuickType::TrueFalse,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickQuiz {
    pub topic: String,
    pub material: String,
    pub difficulty: Difficulty,
    pub question_type: QuickType,
    pub count: u32,
    pub generated: Vec<Question>,
    pub is_generating: bool,
    pub error: Option<GenerationError>,
}

impl Default for QuickQuiz {
    fn default() -> Self {
        Self {
            topic: String::new(),
            material: String::new(),
            difficulty: Difficulty::default(),
            question_type: QuickType::default(),
            count: 5,
            generated: Vec::new(),
            is_generating: false,
            error: None,
        }
    }
}

impl QuickQuiz {
    /// A topic is the only required input
    pub fn can_generate(&self) -> bool {
        !self.topic.trim().is_empty() && !self.is_generating
    }

    /// `(type, quantity, difficulty)` blocks for the current choices
    ///
    /// The count is split evenly over the chosen types, earlier types taking
    /// the remainder. Types that would get zero questions are left out.
    pub fn plan(&self) -> Vec<(QuestionType, u32, Difficulty)> {
        let types = self.question_type.question_types();
        let n = types.len() as u32;
        let (base, remainder) = (self.count / n, self.count % n);

        types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let extra = u32::from((i as u32) < remainder);
                (*t, base + extra, self.difficulty)
            })
            .filter(|(_, quantity, _)| *quantity > 0)
            .collect()
    }

    pub fn request(&self) -> GenerationRequest {
        let configs = QuestionConfigList::from_entries(self.plan());
        GenerationRequest::new(
            self.topic.trim(),
            "",
            &self.material,
            "",
            &[],
            configs.entries(),
        )
    }

    /// Begin generating. `None` when the topic is blank or a run is in flight.
    pub fn start(&mut self) -> Option<GenerationRequest> {
        if !self.can_generate() {
            debug!("Quick quiz not ready to generate");
            return None;
        }
        self.is_generating = true;
        self.error = None;
        self.generated.clear();
        let request = self.request();
        info!(questions = request.total_questions(), "Quick quiz submitted");
        Some(request)
    }

    /// Record the outcome of the run started by [`QuickQuiz::start`]
    pub fn finish(&mut self, outcome: Result<Vec<Question>, GenerationError>) {
        if !self.is_generating {
            debug!("Discarding quick quiz result, nothing in flight");
            return;
        }
        self.is_generating = false;
        match outcome {
            Ok(questions) if !questions.is_empty() => {
                info!(questions = questions.len(), "Quick quiz generated");
                self.generated = questions;
            }
            Ok(_) => self.error = Some(GenerationError::Empty),
            Err(e) => {
                warn!(error = %e, "Quick quiz failed");
                self.error = Some(e);
            }
        }
    }

    /// Step the count through [`QUICK_COUNT_CHOICES`], wrapping around
    pub fn cycle_count(&mut self, forward: bool) {
        let index = QUICK_COUNT_CHOICES
            .iter()
            .position(|c| *c == self.count)
            .unwrap_or(1);
        let len = QUICK_COUNT_CHOICES.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.count = QUICK_COUNT_CHOICES[next];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{MockGenerator, QuizGenerator, check_partition};

    fn quick(question_type: QuickType, count: u32) -> QuickQuiz {
        QuickQuiz {
            topic: "Fotosintesis".into(),
            question_type,
            count,
            difficulty: Difficulty::Hard,
            ..QuickQuiz::default()
        }
    }

    #[test]
    fn test_single_type_plan() {
        assert_eq!(
            quick(QuickType::TrueFalse, 10).plan(),
            vec![(QuestionType::TrueFalse, 10, Difficulty::Hard)]
        );
    }

    #[test]
    fn test_all_spreads_count() {
        assert_eq!(
            quick(QuickType::All, 5).plan(),
            vec![
                (QuestionType::MultipleChoice, 2, Difficulty::Hard),
                (QuestionType::FillBlank, 2, Difficulty::Hard),
                (QuestionType::TrueFalse, 1, Difficulty::Hard),
            ]
        );

        let plan = quick(QuickType::All, 2).plan();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.iter().map(|(_, q, _)| q).sum::<u32>(), 2);
    }

    #[test]
    fn test_request_matches_mock_output() {
        let quiz = quick(QuickType::All, 10);
        let request = quiz.request();
        assert_eq!(request.title, "Fotosintesis");
        assert_eq!(request.total_questions(), 10);

        let questions = MockGenerator::instant().generate(&request).unwrap();
        check_partition(&request, &questions).unwrap();
    }

    #[test]
    fn test_start_requires_topic_and_latches() {
        let mut blank = QuickQuiz::default();
        assert!(blank.start().is_none());

        let mut quiz = quick(QuickType::MultipleChoice, 3);
        assert!(quiz.start().is_some());
        assert!(quiz.is_generating);
        assert!(quiz.start().is_none());
    }

    #[test]
    fn test_finish_records_outcome() {
        let mut quiz = quick(QuickType::FillBlank, 3);
        quiz.finish(Ok(Vec::new()));
        assert!(quiz.error.is_none(), "stray results are ignored");

        let request = quiz.start().unwrap();
        quiz.finish(MockGenerator::instant().generate(&request));
        assert_eq!(quiz.generated.len(), 3);
        assert!(!quiz.is_generating);

        quiz.start();
        assert!(quiz.generated.is_empty());
        quiz.finish(Err(GenerationError::Cancelled));
        assert_eq!(quiz.error, Some(GenerationError::Cancelled));

        quiz.start();
        quiz.finish(Ok(Vec::new()));
        assert_eq!(quiz.error, Some(GenerationError::Empty));
    }

    #[test]
    fn test_count_cycles() {
        let mut quiz = QuickQuiz::default();
        quiz.cycle_count(true);
        assert_eq!(quiz.count, 10);
        quiz.cycle_count(false);
        quiz.cycle_count(false);
        assert_eq!(quiz.count, 3);
        quiz.cycle_count(false);
        assert_eq!(quiz.count, 20);
    }
}
