//! 生成进度渲染

use crate::tui::components::panel;
use crate::tui::state::GenerationProgress;
use crate::tui::theme::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Clear, Gauge, Paragraph, Wrap},
};
use rust_i18n::t;

/// 在向导主体上叠加生成进度
pub fn draw(frame: &mut Frame, area: Rect, progress: &GenerationProgress) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, popup, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(70),
        Constraint::Fill(1),
    ])
    .areas(middle);

    frame.render_widget(Clear, popup);
    let block = panel(t!("generating_title"));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [status_area, gauge_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(inner);

    let status = format!(
        "{} {}",
        progress.spinner(),
        t!("generating_status", n = progress.total_questions())
    );
    frame.render_widget(
        Paragraph::new(status)
            .style(theme().accent())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        status_area,
    );

    let gauge = Gauge::default()
        .gauge_style(theme().progress())
        .ratio(progress.ratio())
        .label(format!("{}s", progress.elapsed_secs()));
    frame.render_widget(gauge, gauge_area);

    frame.render_widget(
        Paragraph::new(t!("generating_hint"))
            .style(theme().hint())
            .alignment(Alignment::Center),
        hint_area,
    );
}
