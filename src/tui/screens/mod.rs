//! 各屏幕渲染

pub mod exit;
pub mod home;
pub mod progress;
pub mod quick;
pub mod wizard;
