//! Wizard state machine
//!
//! All wizard data lives in one [`WizardState`] value. Every change goes
//! through [`WizardState::reduce`], which maps `(state, action)` to the next
//! state plus an optional [`Effect`] for the caller to run. The reducer does
//! no I/O; generation is requested through [`Effect::Generate`] and its
//! outcome is fed back as [`Action::GenerationFinished`].

use crate::config::UploadPolicy;
use crate::generation::{GenerationError, GenerationRequest};
use crate::quiz::{ConfigId, Question, UploadedFile};
use crate::wizard::configs::{ConfigUpdate, QuestionConfigList};
use crate::wizard::uploads::{UploadError, UploadList};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    /// Title and description
    #[default]
    Topic,
    /// Text, files and video link
    Material,
    /// Question types, quantities and difficulties
    Configuration,
    /// Generated questions
    Results,
}

impl WizardStep {
    /// Total number of steps
    pub const COUNT: u8 = 4;

    /// 1-based step number
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Topic => 1,
            WizardStep::Material => 2,
            WizardStep::Configuration => 3,
            WizardStep::Results => 4,
        }
    }

    fn forward(self) -> Self {
        match self {
            WizardStep::Topic => WizardStep::Material,
            WizardStep::Material => WizardStep::Configuration,
            WizardStep::Configuration | WizardStep::Results => WizardStep::Results,
        }
    }

    fn backward(self) -> Self {
        match self {
            WizardStep::Topic | WizardStep::Material => WizardStep::Topic,
            WizardStep::Configuration => WizardStep::Material,
            WizardStep::Results => WizardStep::Results,
        }
    }
}

/// Recoverable failure shown to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Inputs to the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetTitle(String),
    SetDescription(String),
    SetMaterialText(String),
    SetYoutubeUrl(String),
    AddUpload(UploadedFile),
    RemoveUpload(usize),
    AddConfig,
    RemoveConfig(ConfigId),
    UpdateConfig(ConfigId, ConfigUpdate),
    /// Continue to the next step; submits from the configuration step
    Advance,
    /// Go back one step
    Retreat,
    /// Outcome of the generation requested by [`Effect::Generate`]
    GenerationFinished(Result<Vec<Question>, GenerationError>),
    /// Discard everything and start a new quiz
    Restart,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Generate(GenerationRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub title: String,
    pub description: String,
    pub material_text: String,
    pub youtube_url: String,
    pub uploads: UploadList,
    pub configs: QuestionConfigList,
    pub generated: Vec<Question>,
    pub is_generating: bool,
    pub error: Option<WizardError>,
}

impl WizardState {
    /// Fresh wizard with the given upload limits
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            uploads: UploadList::new(policy),
            ..Self::default()
        }
    }

    /// Whether the topic step is complete
    pub fn has_topic(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Whether at least one material source was provided
    pub fn has_material(&self) -> bool {
        !self.material_text.trim().is_empty()
            || !self.uploads.is_empty()
            || !self.youtube_url.trim().is_empty()
    }

    /// Whether [`Action::Advance`] would do anything from the current step
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Topic => self.has_topic(),
            WizardStep::Material => self.has_material(),
            WizardStep::Configuration => !self.configs.is_empty() && !self.is_generating,
            WizardStep::Results => false,
        }
    }

    /// Whether [`Action::Retreat`] would do anything from the current step
    pub fn can_retreat(&self) -> bool {
        matches!(self.step, WizardStep::Material | WizardStep::Configuration)
            && !self.is_generating
    }

    /// Requested question count
    pub fn total_questions(&self) -> u32 {
        self.configs.total_questions()
    }

    /// Snapshot of the inputs sent to the generator
    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest::new(
            self.title.trim(),
            self.description.trim(),
            &self.material_text,
            self.youtube_url.trim(),
            self.uploads.files(),
            self.configs.entries(),
        )
    }

    /// Apply an action in place
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        let (next, effect) = std::mem::take(self).reduce(action);
        *self = next;
        effect
    }

    /// Compute the next state
    pub fn reduce(mut self, action: Action) -> (Self, Option<Effect>) {
        let mut effect = None;

        match action {
            Action::SetTitle(value) => self.title = value,
            Action::SetDescription(value) => self.description = value,
            Action::SetMaterialText(value) => self.material_text = value,
            Action::SetYoutubeUrl(value) => self.youtube_url = value,
            Action::AddUpload(file) => match self.uploads.add(file) {
                Ok(()) => self.error = None,
                Err(e) => {
                    warn!(error = %e, "Upload rejected");
                    self.error = Some(e.into());
                }
            },
            Action::RemoveUpload(index) => {
                self.uploads.remove(index);
            }
            Action::AddConfig => {
                self.configs.add();
            }
            Action::RemoveConfig(id) => {
                self.configs.remove(id);
            }
            Action::UpdateConfig(id, update) => {
                self.configs.update(id, update);
            }
            Action::Advance => {
                if !self.can_advance() {
                    debug!(step = self.step.number(), "Advance blocked");
                } else if self.step == WizardStep::Configuration {
                    let request = self.generation_request();
                    info!(
                        title = %request.title,
                        questions = request.total_questions(),
                        "Submitting quiz generation"
                    );
                    self.is_generating = true;
                    self.error = None;
                    effect = Some(Effect::Generate(request));
                } else {
                    self.step = self.step.forward();
                    debug!(step = self.step.number(), "Advanced");
                }
            }
            Action::Retreat => {
                if self.can_retreat() {
                    self.step = self.step.backward();
                    debug!(step = self.step.number(), "Went back");
                }
            }
            Action::GenerationFinished(outcome) => {
                if !self.is_generating {
                    debug!("Discarding generation result, nothing in flight");
                } else {
                    self.is_generating = false;
                    match outcome {
                        Ok(questions) if !questions.is_empty() => {
                            info!(questions = questions.len(), "Generation finished");
                            self.generated = questions;
                            self.error = None;
                            self.step = WizardStep::Results;
                        }
                        Ok(_) => {
                            warn!("Generator returned no questions");
                            self.error = Some(GenerationError::Empty.into());
                        }
                        Err(e) => {
                            warn!(error = %e, "Generation failed");
                            self.error = Some(e.into());
                        }
                    }
                }
            }
            Action::Restart => {
                let policy = self.uploads.policy().clone();
                info!("Wizard restarted");
                self = Self::new(policy);
            }
        }

        (self, effect)
    }
}
