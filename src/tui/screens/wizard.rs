//! 向导屏幕渲染
//!
//! 顶部为步骤指示条，主体为当前步骤的表单列表，底部是状态行与按键提示。
//! 结果页额外显示可滚动的题目列表。

use crate::quiz::{
    ConfigId, Question, QuestionConfig, answer_label, difficulty_label, format_size_mb, option_letter,
    question_type_label, youtube_video_id,
};
use crate::tui::components::{
    badge, list_content_width, panel, preview_lines, render_hint, render_title_block,
    three_panel_layout, truncate_value,
};
use crate::tui::labels::{step_name, step_title, wizard_error_text};
use crate::tui::screens::progress;
use crate::tui::state::{AppState, FormItem, InputState, StatusMessage};
use crate::tui::theme::{
    config::{HIGHLIGHT_SYMBOL, TEXT_PREVIEW_LINES},
    theme,
};
use crate::wizard::{WizardError, WizardState, WizardStep};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use rust_i18n::t;
use std::borrow::Cow;

const STEPS: [WizardStep; WizardStep::COUNT as usize] = [
    WizardStep::Topic,
    WizardStep::Material,
    WizardStep::Configuration,
    WizardStep::Results,
];

/// 渲染向导
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let [header, body, footer] = three_panel_layout(area);
    let wizard = &state.wizard;

    render_title_block(&step_title(wizard.step), frame, header);
    draw_step_indicator(frame, header.inner(Margin::new(1, 1)), wizard.step);

    let [content, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(body);

    match wizard.step {
        WizardStep::Topic | WizardStep::Material => draw_form(frame, content, state),
        WizardStep::Configuration => {
            let [form_area, summary_area] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(content);
            draw_form(frame, form_area, state);
            draw_config_summary(frame, summary_area, wizard);
        }
        WizardStep::Results => {
            let [results_area, actions_area] =
                Layout::vertical([Constraint::Min(5), Constraint::Length(5)]).areas(content);
            draw_results(frame, results_area, state);
            draw_form(frame, actions_area, state);
        }
    }

    draw_status(frame, status_area, state);
    render_hint(&footer_hint(state), frame, footer);

    if let Some(progress_state) = &state.progress {
        progress::draw(frame, content, progress_state);
    }
}

/// 步骤指示条：已完成为绿色，当前为强调色
fn draw_step_indicator(frame: &mut Frame, area: Rect, current: WizardStep) {
    let mut spans = Vec::new();
    for (i, step) in STEPS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", theme().hint()));
        }
        let style = if *step == current {
            theme().title()
        } else if *step < current {
            theme().success()
        } else {
            theme().hint()
        };
        let marker = if *step < current {
            "✓".to_string()
        } else {
            step.number().to_string()
        };
        spans.push(Span::styled(format!("{} {}", marker, step_name(*step)), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

/// 当前步骤的表单列表
fn draw_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let wizard = &state.wizard;
    let items = FormItem::items_for(wizard);
    let width = list_content_width(area);

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == state.form.selected;
            let editing = selected.then_some(state.form.input.as_ref()).flatten();
            ListItem::new(item_lines(*item, wizard, editing, width))
                .style(item_style(*item, wizard, selected, editing.is_some()))
        })
        .collect();

    let title = match wizard.step {
        WizardStep::Results => t!("export_panel"),
        _ => t!("form_panel"),
    };
    let list = List::new(list_items)
        .block(panel(title))
        .highlight_style(theme().selected())
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut list_state = ListState::default().with_selected(Some(state.form.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn item_style(item: FormItem, wizard: &WizardState, selected: bool, editing: bool) -> Style {
    if editing {
        return theme().editing();
    }
    let enabled = match item {
        FormItem::Continue => wizard.can_advance(),
        FormItem::Back => wizard.can_retreat(),
        _ => true,
    };
    match (enabled, selected) {
        (false, _) => theme().disabled(),
        (true, true) => theme().selected(),
        (true, false) if matches!(item, FormItem::File(_)) => theme().accent(),
        (true, false) => theme().normal(),
    }
}

/// 表单项显示内容
fn item_lines(
    item: FormItem,
    wizard: &WizardState,
    editing: Option<&InputState>,
    width: usize,
) -> Vec<Line<'static>> {
    match item {
        FormItem::Title => field_lines(t!("field_title"), &wizard.title, editing, width),
        FormItem::Description => {
            field_lines(t!("field_description"), &wizard.description, editing, width)
        }
        FormItem::MaterialText => {
            field_lines(t!("field_material"), &wizard.material_text, editing, width)
        }
        FormItem::YoutubeUrl => {
            field_lines(t!("field_youtube"), &wizard.youtube_url, editing, width)
        }
        FormItem::AddFile => {
            let policy = wizard.uploads.policy();
            let label = t!(
                "add_file",
                count = wizard.uploads.len(),
                max = policy.max_files
            );
            let mut lines = vec![Line::from(label.to_string())];
            match editing {
                Some(input) => lines.push(Line::from(format!("  {}", with_cursor(input)))),
                None => lines.push(Line::from(Span::styled(
                    format!(
                        "  {}",
                        t!(
                            "add_file_hint",
                            types = policy.extensions_label(),
                            size = format_size_mb(policy.max_file_bytes)
                        )
                    ),
                    theme().hint(),
                ))),
            }
            lines
        }
        FormItem::File(index) => {
            let text = wizard
                .uploads
                .files()
                .get(index)
                .map(|f| format!("  📄 {} ({})", f.name, f.size_label()))
                .unwrap_or_default();
            vec![Line::from(truncate_value(&text, width))]
        }
        FormItem::ConfigType(id) => config_line(wizard, id, true, |config| {
            (t!("field_type"), question_type_label(config.question_type))
        }),
        FormItem::ConfigQuantity(id) => config_line(wizard, id, false, |config| {
            (t!("field_quantity"), config.quantity.to_string().into())
        }),
        FormItem::ConfigDifficulty(id) => config_line(wizard, id, false, |config| {
            (t!("field_difficulty"), difficulty_label(config.difficulty))
        }),
        FormItem::RemoveConfig(_) => vec![Line::from(format!("     {}", t!("remove_config")))],
        FormItem::AddConfig => vec![Line::from(format!("＋ {}", t!("add_config")))],
        FormItem::Back => vec![Line::from(format!("← {}", t!("back")))],
        FormItem::Continue => {
            let label = match wizard.step {
                WizardStep::Configuration if wizard.is_generating => t!("generating_title"),
                WizardStep::Configuration => t!("generate_n", n = wizard.total_questions()),
                _ => t!("continue"),
            };
            vec![Line::from(format!("{} →", label))]
        }
        FormItem::ExportQuestions => vec![Line::from(format!("⬇ {}", t!("export_questions")))],
        FormItem::ExportAnswerKey => vec![Line::from(format!("⬇ {}", t!("export_answer_key")))],
        FormItem::NewQuiz => vec![Line::from(format!("↻ {}", t!("new_quiz")))],
    }
}

/// 输入字段：标签一行，值预览若干行
pub fn field_lines(
    label: impl Into<String>,
    value: &str,
    editing: Option<&InputState>,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(label.into())];
    let inner_width = width.saturating_sub(2);

    let body = match editing {
        Some(input) => preview_lines(&with_cursor(input), inner_width, TEXT_PREVIEW_LINES),
        None if value.trim().is_empty() => vec![Line::from(Span::styled(
            t!("placeholder_empty").to_string(),
            theme().hint(),
        ))],
        None => preview_lines(value, inner_width, TEXT_PREVIEW_LINES),
    };

    lines.extend(body.into_iter().map(|line| {
        let mut spans = vec![Span::raw("  ")];
        spans.extend(line.spans);
        Line::from(spans)
    }));
    lines
}

/// 在光标处插入竖线
pub fn with_cursor(input: &InputState) -> String {
    let (before, after) = input.split_at_cursor();
    format!("{}▏{}", before, after)
}

/// 配置项一行：`#1 题型: ◀ 选择题 ▶`，仅题型行带序号
fn config_line<F>(wizard: &WizardState, id: ConfigId, numbered: bool, field: F) -> Vec<Line<'static>>
where
    F: Fn(&QuestionConfig) -> (Cow<'static, str>, Cow<'static, str>),
{
    let entries = wizard.configs.entries();
    let Some((index, config)) = entries.iter().enumerate().find(|(_, c)| c.id == id) else {
        return vec![Line::from(String::new())];
    };
    let (label, value) = field(config);
    let prefix = if numbered {
        format!("#{} ", index + 1)
    } else {
        "   ".to_string()
    };

    vec![Line::from(format!("{}{}: ◀ {} ▶", prefix, label, value))]
}

/// 配置摘要面板
fn draw_config_summary(frame: &mut Frame, area: Rect, wizard: &WizardState) {
    let mut lines: Vec<Line> = wizard
        .configs
        .entries()
        .iter()
        .map(|config| {
            Line::from(vec![
                Span::styled("• ", theme().accent()),
                Span::styled(
                    format!(
                        "{} × {} ",
                        question_type_label(config.question_type),
                        config.quantity
                    ),
                    theme().normal(),
                ),
                badge(
                    &difficulty_label(config.difficulty),
                    theme().difficulty(config.difficulty),
                ),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        t!("config_total", n = wizard.total_questions()).to_string(),
        theme().title(),
    )));

    let summary = Paragraph::new(lines)
        .block(panel(t!("config_summary")))
        .wrap(Wrap { trim: false });
    frame.render_widget(summary, area);
}

/// 结果页题目列表
fn draw_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let wizard = &state.wizard;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("✓ {}", t!("quiz_ready")),
            theme().success(),
        )),
        Line::from(Span::styled(
            format!(
                "{} · {}",
                wizard.title.trim(),
                t!("quiz_total", n = wizard.generated.len())
            ),
            theme().hint(),
        )),
    ];
    lines.extend(question_lines(&wizard.generated));

    let results = Paragraph::new(lines)
        .block(panel(t!("results_panel")))
        .wrap(Wrap { trim: false })
        .scroll((state.form.results_scroll, 0));
    frame.render_widget(results, area);
}

/// 题目卡片：徽章、题干、选项（正确项高亮）、答案与解析
pub fn question_lines(questions: &[Question]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, question) in questions.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), theme().title()),
            badge(&question_type_label(question.question_type), theme().badge()),
            Span::raw(" "),
            badge(
                &difficulty_label(question.difficulty),
                theme().difficulty(question.difficulty),
            ),
        ]));
        lines.extend(
            question
                .text
                .lines()
                .map(|l| Line::from(Span::styled(format!("   {}", l), theme().normal()))),
        );

        let correct = question.correct_option_index();
        if let Some(options) = &question.options {
            for (index, option) in options.iter().enumerate() {
                let (marker, style) = if correct == Some(index) {
                    ("✓", theme().correct())
                } else {
                    (" ", theme().normal())
                };
                lines.push(Line::from(Span::styled(
                    format!("   {} {}. {}", marker, option_letter(index), option),
                    style,
                )));
            }
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   {}: ", answer_label(question.question_type)),
                    theme().success(),
                ),
                Span::styled(question.correct_answer.clone(), theme().normal()),
            ]));
        }

        if !question.explanation.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("   {}: {}", t!("explanation"), question.explanation),
                theme().hint(),
            )));
        }
    }
    lines
}

/// 状态行：向导错误优先，其次是操作提示与链接校验
fn draw_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let wizard = &state.wizard;
    let line = if let Some(error) = &wizard.error {
        let text = match error {
            WizardError::Generation(_) => {
                format!("✗ {} · {}", wizard_error_text(error), t!("retry_hint"))
            }
            WizardError::Upload(_) => format!("✗ {}", wizard_error_text(error)),
        };
        Span::styled(text, theme().error())
    } else if let Some(status) = &state.form.status {
        match status {
            StatusMessage::Info(message) => Span::styled(format!("✓ {}", message), theme().success()),
            StatusMessage::Error(message) => Span::styled(format!("✗ {}", message), theme().error()),
        }
    } else if wizard.step == WizardStep::Material && !wizard.youtube_url.trim().is_empty() {
        match youtube_video_id(wizard.youtube_url.trim()) {
            Some(id) => Span::styled(t!("youtube_detected", id = id).to_string(), theme().hint()),
            None => Span::styled(t!("youtube_invalid").to_string(), theme().warning()),
        }
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn footer_hint(state: &AppState) -> String {
    if state.wizard.is_generating {
        return t!("generating_hint").to_string();
    }
    if let Some(input) = &state.form.input {
        return if input.is_multiline() {
            t!("input_multiline_hint").to_string()
        } else {
            t!("input_hint").to_string()
        };
    }
    match state.wizard.step {
        WizardStep::Configuration => t!("config_hint").to_string(),
        WizardStep::Results => t!("results_hint").to_string(),
        WizardStep::Topic | WizardStep::Material => t!("nav_hint").to_string(),
    }
}
