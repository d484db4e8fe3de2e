//! 快速出题屏幕渲染
//!
//! 左侧是单页表单，右侧直接显示生成的题目。

use crate::quick::QuickQuiz;
use crate::quiz::difficulty_label;
use crate::tui::components::{
    list_content_width, panel, render_hint, render_title_block, three_panel_layout,
};
use crate::tui::labels::{generation_error_text, quick_type_label};
use crate::tui::screens::progress;
use crate::tui::screens::wizard::{field_lines, question_lines};
use crate::tui::state::{AppState, InputState, QuickItem, StatusMessage};
use crate::tui::theme::{config::HIGHLIGHT_SYMBOL, theme};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use rust_i18n::t;

/// 渲染快速出题
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let [header, body, footer] = three_panel_layout(area);
    render_title_block(&t!("quick_title"), frame, header);

    let [content, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(body);
    let [form_area, results_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .areas(content);

    draw_form(frame, form_area, state);
    draw_results(frame, results_area, state);
    draw_status(frame, status_area, state);
    render_hint(&footer_hint(state), frame, footer);

    if let Some(progress_state) = &state.progress {
        progress::draw(frame, content, progress_state);
    }
}

fn draw_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let quick = &state.quick;
    let width = list_content_width(area);

    let list_items: Vec<ListItem> = QuickItem::items_for(quick)
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == state.form.selected;
            let editing = selected.then_some(state.form.input.as_ref()).flatten();
            ListItem::new(item_lines(item, quick, editing, width))
                .style(item_style(item, quick, selected, editing.is_some()))
        })
        .collect();

    let list = List::new(list_items)
        .block(panel(t!("quick_panel")))
        .highlight_style(theme().selected())
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut list_state = ListState::default().with_selected(Some(state.form.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn item_style(item: QuickItem, quick: &QuickQuiz, selected: bool, editing: bool) -> Style {
    if editing {
        return theme().editing();
    }
    if item == QuickItem::Generate && !quick.can_generate() {
        return theme().disabled();
    }
    if selected {
        theme().selected()
    } else {
        theme().normal()
    }
}

fn item_lines(
    item: QuickItem,
    quick: &QuickQuiz,
    editing: Option<&InputState>,
    width: usize,
) -> Vec<Line<'static>> {
    let option = |label: std::borrow::Cow<'static, str>, value: String| {
        vec![Line::from(format!("{}: ◀ {} ▶", label, value))]
    };

    match item {
        QuickItem::Topic => field_lines(t!("quick_field_topic"), &quick.topic, editing, width),
        QuickItem::Material => {
            field_lines(t!("quick_field_material"), &quick.material, editing, width)
        }
        QuickItem::Difficulty => option(
            t!("field_difficulty"),
            difficulty_label(quick.difficulty).to_string(),
        ),
        QuickItem::QuestionType => option(
            t!("quick_field_type"),
            quick_type_label(quick.question_type).to_string(),
        ),
        QuickItem::Count => option(t!("quick_field_count"), quick.count.to_string()),
        QuickItem::Generate => {
            let label = if quick.is_generating {
                t!("generating_title")
            } else {
                t!("quick_generate")
            };
            vec![Line::from(format!("🎯 {}", label))]
        }
        QuickItem::Reset => vec![Line::from(format!("↻ {}", t!("quick_reset")))],
    }
}

fn draw_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let quick = &state.quick;
    let lines = if quick.generated.is_empty() {
        vec![Line::from(Span::styled(
            t!("quick_results_hint").to_string(),
            theme().hint(),
        ))]
    } else {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("✓ {}", t!("quiz_ready")),
                theme().success(),
            )),
            Line::from(Span::styled(
                t!("quiz_total", n = quick.generated.len()).to_string(),
                theme().hint(),
            )),
        ];
        lines.extend(question_lines(&quick.generated));
        lines
    };

    let results = Paragraph::new(lines)
        .block(panel(t!("results_panel")))
        .wrap(Wrap { trim: false })
        .scroll((state.form.results_scroll, 0));
    frame.render_widget(results, area);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match (&state.quick.error, &state.form.status) {
        (Some(error), _) => Span::styled(
            format!("✗ {} · {}", generation_error_text(error), t!("retry_hint")),
            theme().error(),
        ),
        (None, Some(StatusMessage::Info(message))) => {
            Span::styled(format!("✓ {}", message), theme().success())
        }
        (None, Some(StatusMessage::Error(message))) => {
            Span::styled(format!("✗ {}", message), theme().error())
        }
        (None, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn footer_hint(state: &AppState) -> String {
    if state.quick.is_generating {
        return t!("generating_hint").to_string();
    }
    match &state.form.input {
        Some(input) if input.is_multiline() => t!("input_multiline_hint").to_string(),
        Some(_) => t!("input_hint").to_string(),
        None => t!("quick_hint").to_string(),
    }
}
