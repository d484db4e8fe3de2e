//! Ratatui 终端 UI 模块
//!
//! 提供基于 ratatui 的出题向导界面，以及命令行模式下的结果打印。

pub mod app;
pub mod components;
pub mod display;
pub mod event;
pub mod labels;
pub mod screens;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::TuiApp;
pub use display::{display_quiz, should_run_interactive};
pub use event::{EventPoll, TuiEvent};
pub use state::{AppState, FormItem, InputState, MenuState, Screen, WizardForm};
pub use theme::{Theme, theme};
pub use ui::render;
