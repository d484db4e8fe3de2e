//! TUI 状态模块

pub mod app;
pub mod form;
pub mod input;
pub mod menu;
pub mod progress;
pub mod quick;
pub mod selection;

pub use app::AppState;
pub use form::{FormItem, StatusMessage, WizardForm};
pub use input::InputState;
pub use menu::{HomeItem, MenuState, Screen};
pub use progress::GenerationProgress;
pub use quick::QuickItem;
pub use selection::Selectable;
