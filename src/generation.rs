//! Quiz generation boundary
//!
//! The wizard hands a [`GenerationRequest`] to a [`QuizGenerator`] and gets
//! back an ordered list of questions. Generation runs on a worker thread via
//! [`GenerationJob`] so the UI keeps drawing while it waits.
//!
//! The shipped [`MockGenerator`] waits for a fixed delay and fills question
//! templates. It honours the requested configuration: one block of questions
//! per entry, with that entry's type, difficulty and quantity.

use crate::quiz::{Difficulty, Question, QuestionConfig, QuestionType, UploadedFile};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures of a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("generation was cancelled")]
    Cancelled,

    #[error("generator failed: {0}")]
    Failed(String),

    #[error("generator returned no questions")]
    Empty,

    #[error("generator returned {actual} questions that do not match the {expected} requested")]
    ConfigurationMismatch { expected: u32, actual: usize },
}

/// Uploaded file as seen by the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedFile {
    pub name: String,
    pub size_bytes: u64,
}

/// One requested block of questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub question_type: QuestionType,
    pub quantity: u32,
    pub difficulty: Difficulty,
}

/// Everything the wizard collected, as sent to the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub title: String,
    pub description: String,
    pub material_text: String,
    pub youtube_url: String,
    pub uploaded_files: Vec<RequestedFile>,
    pub question_configs: Vec<QuestionSpec>,
}

impl GenerationRequest {
    pub fn new(
        title: &str,
        description: &str,
        material_text: &str,
        youtube_url: &str,
        uploads: &[UploadedFile],
        configs: &[QuestionConfig],
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            material_text: material_text.to_string(),
            youtube_url: youtube_url.to_string(),
            uploaded_files: uploads
                .iter()
                .map(|f| RequestedFile {
                    name: f.name.clone(),
                    size_bytes: f.size_bytes,
                })
                .collect(),
            question_configs: configs
                .iter()
                .map(|c| QuestionSpec {
                    question_type: c.question_type,
                    quantity: c.quantity,
                    difficulty: c.difficulty,
                })
                .collect(),
        }
    }

    /// Sum of requested quantities, saturating at `u32::MAX`
    pub fn total_questions(&self) -> u32 {
        self.question_configs
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.quantity))
    }
}

/// A service that turns a request into quiz questions
///
/// Implementations must return exactly `request.total_questions()` questions,
/// grouped in request order, each group carrying its entry's type and
/// difficulty. Calls may block; they run off the UI thread.
pub trait QuizGenerator: Send + Sync + std::fmt::Debug {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationError>;
}

/// Check that questions follow the requested partition
pub fn check_partition(
    request: &GenerationRequest,
    questions: &[Question],
) -> Result<(), GenerationError> {
    let expected = request.total_questions();
    let mismatch = || GenerationError::ConfigurationMismatch {
        expected,
        actual: questions.len(),
    };

    if questions.len() != expected as usize {
        return Err(mismatch());
    }

    let mut remaining = questions.iter();
    for spec in &request.question_configs {
        for _ in 0..spec.quantity {
            match remaining.next() {
                Some(q) if q.question_type == spec.question_type && q.difficulty == spec.difficulty => {}
                _ => return Err(mismatch()),
            }
        }
    }

    Ok(())
}

/// Template-based stand-in for a real generation service
#[derive(Debug, Clone)]
pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Generator without simulated latency
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    fn build_question(
        &self,
        number: usize,
        topic: &str,
        question_type: QuestionType,
        difficulty: Difficulty,
    ) -> Question {
        let n = number.to_string();
        let (text, options, correct_answer, explanation) = match question_type {
            QuestionType::MultipleChoice => {
                let correct = t!("mock_mc_correct", topic = topic).to_string();
                let mut options = vec![
                    t!("mock_mc_wrong_1", topic = topic).to_string(),
                    t!("mock_mc_wrong_2", topic = topic).to_string(),
                    t!("mock_mc_wrong_3", topic = topic).to_string(),
                ];
                // rotate the position of the correct option
                options.insert((number - 1) % 4, correct.clone());
                (
                    t!("mock_mc_question", topic = topic, n = n).to_string(),
                    Some(options),
                    correct,
                    t!("mock_mc_explanation", topic = topic).to_string(),
                )
            }
            QuestionType::Essay => (
                t!("mock_essay_question", topic = topic, n = n).to_string(),
                None,
                t!("mock_essay_answer", topic = topic).to_string(),
                t!("mock_essay_explanation", topic = topic).to_string(),
            ),
            QuestionType::FillBlank => (
                t!("mock_fill_question", topic = topic, n = n).to_string(),
                None,
                topic.to_lowercase(),
                t!("mock_fill_explanation", topic = topic).to_string(),
            ),
            QuestionType::TrueFalse => {
                let is_true = number % 2 == 1;
                let (text, answer) = if is_true {
                    (t!("mock_tf_true_statement", topic = topic, n = n), t!("answer_true"))
                } else {
                    (t!("mock_tf_false_statement", topic = topic, n = n), t!("answer_false"))
                };
                (
                    text.to_string(),
                    None,
                    answer.to_string(),
                    t!("mock_tf_explanation", topic = topic).to_string(),
                )
            }
        };

        Question {
            id: n,
            text,
            question_type,
            options,
            correct_answer,
            explanation,
            difficulty,
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(2500))
    }
}

impl QuizGenerator for MockGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        if let Some(spec) = request
            .question_configs
            .iter()
            .find(|c| c.quantity > QuestionConfig::MAX_QUANTITY)
        {
            return Err(GenerationError::Failed(format!(
                "at most {} questions per entry, got {}",
                QuestionConfig::MAX_QUANTITY,
                spec.quantity
            )));
        }

        let topic = request.title.trim();
        let mut questions = Vec::with_capacity(request.total_questions() as usize);
        for spec in &request.question_configs {
            for _ in 0..spec.quantity {
                let number = questions.len() + 1;
                questions.push(self.build_question(
                    number,
                    topic,
                    spec.question_type,
                    spec.difficulty,
                ));
            }
        }

        debug!(count = questions.len(), "Mock questions generated");
        Ok(questions)
    }
}

/// A generation running on a worker thread
#[derive(Debug)]
pub struct GenerationJob {
    receiver: Receiver<Result<Vec<Question>, GenerationError>>,
    request: GenerationRequest,
    started_at: Instant,
    timeout: Duration,
    finished: bool,
}

impl GenerationJob {
    /// Start generating on a new worker thread
    pub fn spawn(
        generator: Arc<dyn QuizGenerator>,
        request: GenerationRequest,
        timeout: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_request = request.clone();

        std::thread::spawn(move || {
            let outcome = generator.generate(&worker_request);
            // the receiver is gone when the job was cancelled or timed out
            let _ = tx.send(outcome);
        });

        info!(
            questions = request.total_questions(),
            timeout_secs = timeout.as_secs(),
            "Generation job started"
        );

        Self {
            receiver: rx,
            request,
            started_at: Instant::now(),
            timeout,
            finished: false,
        }
    }

    /// Non-blocking check for the outcome. Yields a value at most once.
    pub fn poll(&mut self) -> Option<Result<Vec<Question>, GenerationError>> {
        if self.finished {
            return None;
        }

        let outcome = match self.receiver.try_recv() {
            Ok(outcome) => Some(self.verify(outcome)),
            Err(TryRecvError::Empty) if self.started_at.elapsed() >= self.timeout => {
                warn!(timeout_secs = self.timeout.as_secs(), "Generation timed out");
                Some(Err(GenerationError::Timeout {
                    secs: self.timeout.as_secs(),
                }))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(GenerationError::Failed(
                "generation worker stopped unexpectedly".into(),
            ))),
        };

        if outcome.is_some() {
            self.finished = true;
        }
        outcome
    }

    /// Block until the outcome arrives or the timeout passes
    pub fn wait(mut self) -> Result<Vec<Question>, GenerationError> {
        let remaining = self.timeout.saturating_sub(self.started_at.elapsed());
        let outcome = match self.receiver.recv_timeout(remaining) {
            Ok(outcome) => self.verify(outcome),
            Err(RecvTimeoutError::Timeout) => Err(GenerationError::Timeout {
                secs: self.timeout.as_secs(),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(GenerationError::Failed(
                "generation worker stopped unexpectedly".into(),
            )),
        };
        self.finished = true;
        outcome
    }

    /// Abandon the job; a late result from the worker is dropped
    pub fn cancel(mut self) -> GenerationError {
        self.finished = true;
        info!(
            elapsed_ms = self.started_at.elapsed().as_millis() as u64,
            "Generation cancelled"
        );
        GenerationError::Cancelled
    }

    /// Time spent waiting so far
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Fraction of the timeout already used, in `0.0..=1.0`
    pub fn timeout_ratio(&self) -> f64 {
        let total = self.timeout.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        (self.elapsed().as_secs_f64() / total).min(1.0)
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    fn verify(
        &self,
        outcome: Result<Vec<Question>, GenerationError>,
    ) -> Result<Vec<Question>, GenerationError> {
        let questions = outcome?;
        if questions.is_empty() {
            return Err(GenerationError::Empty);
        }
        check_partition(&self.request, &questions)?;
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::QuestionConfigList;

    fn request(configs: &[(QuestionType, u32, Difficulty)]) -> GenerationRequest {
        let list = QuestionConfigList::from_entries(configs.iter().copied());
        GenerationRequest::new("Fotosintesis", "", "Tumbuhan hijau...", "", &[], list.entries())
    }

    #[derive(Debug)]
    struct Failing;

    impl QuizGenerator for Failing {
        fn generate(&self, _: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
            Err(GenerationError::Failed("service unavailable".into()))
        }
    }

    #[derive(Debug)]
    struct Slow(Duration);

    impl QuizGenerator for Slow {
        fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
            std::thread::sleep(self.0);
            MockGenerator::instant().generate(request)
        }
    }

    /// Ignores the request, like a placeholder backend would
    #[derive(Debug)]
    struct FixedTwo;

    impl QuizGenerator for FixedTwo {
        fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
            let fixed = GenerationRequest {
                question_configs: vec![
                    QuestionSpec {
                        question_type: QuestionType::MultipleChoice,
                        quantity: 1,
                        difficulty: Difficulty::Medium,
                    },
                    QuestionSpec {
                        question_type: QuestionType::Essay,
                        quantity: 1,
                        difficulty: Difficulty::Hard,
                    },
                ],
                ..request.clone()
            };
            MockGenerator::instant().generate(&fixed)
        }
    }

    #[test]
    fn test_mock_honours_single_config() {
        let req = request(&[(QuestionType::MultipleChoice, 5, Difficulty::Medium)]);
        let questions = MockGenerator::instant().generate(&req).unwrap();

        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.question_type == QuestionType::MultipleChoice
            && q.difficulty == Difficulty::Medium));
        for q in &questions {
            let options = q.options.as_ref().unwrap();
            assert_eq!(options.len(), 4);
            assert!(q.correct_option_index().is_some());
        }
        check_partition(&req, &questions).unwrap();
    }

    #[test]
    fn test_mock_partitions_in_request_order() {
        let req = request(&[
            (QuestionType::MultipleChoice, 3, Difficulty::Easy),
            (QuestionType::Essay, 2, Difficulty::Hard),
        ]);
        let questions = MockGenerator::instant().generate(&req).unwrap();

        let kinds: Vec<_> = questions
            .iter()
            .map(|q| (q.question_type, q.difficulty))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (QuestionType::MultipleChoice, Difficulty::Easy),
                (QuestionType::MultipleChoice, Difficulty::Easy),
                (QuestionType::MultipleChoice, Difficulty::Easy),
                (QuestionType::Essay, Difficulty::Hard),
                (QuestionType::Essay, Difficulty::Hard),
            ]
        );
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(questions[3].options.is_none());
    }

    #[test]
    fn test_mock_is_deterministic() {
        let req = request(&[
            (QuestionType::TrueFalse, 2, Difficulty::Easy),
            (QuestionType::FillBlank, 1, Difficulty::Medium),
        ]);
        let generator = MockGenerator::instant();
        assert_eq!(generator.generate(&req), generator.generate(&req));
    }

    #[test]
    fn test_check_partition_rejects_placeholder_output() {
        let req = request(&[(QuestionType::MultipleChoice, 5, Difficulty::Medium)]);
        let questions = FixedTwo.generate(&req).unwrap();
        assert_eq!(
            check_partition(&req, &questions),
            Err(GenerationError::ConfigurationMismatch {
                expected: 5,
                actual: 2
            })
        );

        let req = request(&[
            (QuestionType::MultipleChoice, 1, Difficulty::Medium),
            (QuestionType::Essay, 1, Difficulty::Easy),
        ]);
        let questions = FixedTwo.generate(&req).unwrap();
        assert!(check_partition(&req, &questions).is_err());
    }

    #[test]
    fn test_job_delivers_result() {
        let req = request(&[(QuestionType::Essay, 2, Difficulty::Hard)]);
        let job = GenerationJob::spawn(
            Arc::new(MockGenerator::new(Duration::from_millis(10))),
            req,
            Duration::from_secs(5),
        );
        let questions = job.wait().unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_job_poll_yields_once() {
        let req = request(&[(QuestionType::Essay, 1, Difficulty::Easy)]);
        let mut job = GenerationJob::spawn(
            Arc::new(MockGenerator::instant()),
            req,
            Duration::from_secs(5),
        );

        let deadline = Instant::now() + Duration::from_secs(5);
        let outcome = loop {
            if let Some(outcome) = job.poll() {
                break outcome;
            }
            assert!(Instant::now() < deadline, "job never finished");
            std::thread::sleep(Duration::from_millis(5));
        };
        assert!(outcome.is_ok());
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_job_reports_generator_failure() {
        let req = request(&[(QuestionType::Essay, 1, Difficulty::Easy)]);
        let job = GenerationJob::spawn(Arc::new(Failing), req, Duration::from_secs(5));
        assert_eq!(
            job.wait(),
            Err(GenerationError::Failed("service unavailable".into()))
        );
    }

    #[test]
    fn test_job_times_out() {
        let req = request(&[(QuestionType::Essay, 1, Difficulty::Easy)]);
        let job = GenerationJob::spawn(
            Arc::new(Slow(Duration::from_millis(500))),
            req,
            Duration::from_millis(20),
        );
        assert!(matches!(job.wait(), Err(GenerationError::Timeout { .. })));
    }

    #[test]
    fn test_job_rejects_mismatched_output() {
        let req = request(&[(QuestionType::MultipleChoice, 5, Difficulty::Medium)]);
        let job = GenerationJob::spawn(Arc::new(FixedTwo), req, Duration::from_secs(5));
        assert!(matches!(
            job.wait(),
            Err(GenerationError::ConfigurationMismatch { .. })
        ));
    }

    #[test]
    fn test_cancel_returns_cancelled() {
        let req = request(&[(QuestionType::Essay, 1, Difficulty::Easy)]);
        let job = GenerationJob::spawn(
            Arc::new(Slow(Duration::from_millis(200))),
            req,
            Duration::from_secs(5),
        );
        assert_eq!(job.cancel(), GenerationError::Cancelled);
    }

    #[test]
    fn test_mock_rejects_oversized_request() {
        let mut req = request(&[(QuestionType::Essay, 1, Difficulty::Easy)]);
        req.question_configs.push(QuestionSpec {
            question_type: QuestionType::MultipleChoice,
            quantity: u32::MAX,
            difficulty: Difficulty::Hard,
        });

        assert_eq!(req.total_questions(), u32::MAX);
        assert!(matches!(
            MockGenerator::instant().generate(&req),
            Err(GenerationError::Failed(_))
        ));
    }

    #[test]
    fn test_request_serializes_for_the_wire() {
        let req = request(&[(QuestionType::FillBlank, 3, Difficulty::Easy)]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["question_configs"][0]["question_type"], "fill-blank");
        assert_eq!(json["question_configs"][0]["quantity"], 3);
        assert_eq!(req.total_questions(), 3);
    }
}
