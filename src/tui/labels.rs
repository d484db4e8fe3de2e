//! 本地化标签映射
//!
//! 将枚举映射为稳定的翻译键，避免依赖 Debug 输出。

use crate::generation::GenerationError;
use crate::quick::QuickType;
use crate::quiz::{QuestionType, question_type_label};
use crate::wizard::{UploadError, WizardError, WizardStep};
use rust_i18n::t;
use std::borrow::Cow;

/// 步骤短名，用于步骤指示条
pub fn step_name(step: WizardStep) -> Cow<'static, str> {
    match step {
        WizardStep::Topic => t!("step_topic"),
        WizardStep::Material => t!("step_material"),
        WizardStep::Configuration => t!("step_configuration"),
        WizardStep::Results => t!("step_results"),
    }
}

/// 步骤完整标题
pub fn step_title(step: WizardStep) -> Cow<'static, str> {
    match step {
        WizardStep::Topic => t!("step_topic_title"),
        WizardStep::Material => t!("step_material_title"),
        WizardStep::Configuration => t!("step_configuration_title"),
        WizardStep::Results => t!("step_results_title"),
    }
}

/// 快速出题的题型标签
pub fn quick_type_label(question_type: QuickType) -> Cow<'static, str> {
    match question_type {
        QuickType::All => t!("quick_type_all"),
        QuickType::MultipleChoice => question_type_label(QuestionType::MultipleChoice),
        QuickType::FillBlank => question_type_label(QuestionType::FillBlank),
        QuickType::TrueFalse => question_type_label(QuestionType::TrueFalse),
    }
}

/// 生成错误的界面文本
pub fn generation_error_text(error: &GenerationError) -> Cow<'static, str> {
    match error {
        GenerationError::Timeout { secs } => t!("error_timeout", secs = secs),
        GenerationError::Cancelled => t!("error_cancelled"),
        GenerationError::Failed(message) => t!("error_failed", message = message),
        GenerationError::Empty => t!("error_empty"),
        GenerationError::ConfigurationMismatch { expected, actual } => {
            t!("error_mismatch", expected = expected, actual = actual)
        }
    }
}

/// 上传错误的界面文本
pub fn upload_error_text(error: &UploadError) -> Cow<'static, str> {
    match error {
        UploadError::UnsupportedExtension { name, allowed } => {
            t!("error_upload_type", name = name, allowed = allowed)
        }
        UploadError::TooLarge { name, size, limit } => {
            t!("error_upload_size", name = name, size = size, limit = limit)
        }
        UploadError::TooManyFiles { limit } => t!("error_upload_count", limit = limit),
        UploadError::Duplicate { name } => t!("error_upload_duplicate", name = name),
        UploadError::Unreadable { path, message } => {
            t!("error_upload_unreadable", path = path.display(), message = message)
        }
    }
}

pub fn wizard_error_text(error: &WizardError) -> Cow<'static, str> {
    match error {
        WizardError::Upload(e) => upload_error_text(e),
        WizardError::Generation(e) => generation_error_text(e),
    }
}
