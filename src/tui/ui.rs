//! UI渲染模块
//!
//! 按当前屏幕分发到各屏幕的绘制函数。

use crate::tui::screens::{exit, home, quick, wizard};
use crate::tui::state::{AppState, Screen};
use crate::tui::theme::theme;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

/// 设置全局背景
fn set_background(area: Rect, buf: &mut Buffer) {
    let style = Style::new().bg(theme().bg);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut(Position { x, y }) {
                cell.set_style(style);
            }
        }
    }
}

/// 渲染整个应用
pub fn render(terminal: &mut DefaultTerminal, state: &mut AppState) -> std::io::Result<()> {
    terminal.draw(|frame| draw(frame, frame.area(), state))?;
    Ok(())
}

/// 主渲染函数
fn draw(frame: &mut Frame, area: Rect, state: &mut AppState) {
    set_background(area, frame.buffer_mut());

    match state.current_screen {
        Screen::Home => home::draw(frame, area, state),
        Screen::Wizard => wizard::draw(frame, area, state),
        Screen::Quick => quick::draw(frame, area, state),
        Screen::Exit => exit::draw(frame, area),
    }
}
