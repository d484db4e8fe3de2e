//! 首页渲染

use crate::tui::components::{panel, render_hint, render_title_block, three_panel_layout};
use crate::tui::state::{AppState, HomeItem, Selectable};
use crate::tui::theme::{config::HIGHLIGHT_SYMBOL, theme};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
};
use rust_i18n::t;

/// 渲染首页
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let [header, body, footer] = three_panel_layout(area);

    render_title_block(&t!("app_name"), frame, header);

    let [hero_area, menu_area] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(5)]).areas(body);

    let mut lines = vec![
        Line::from(Span::styled(t!("home_headline").to_string(), theme().title())),
        Line::from(Span::styled(t!("home_tagline").to_string(), theme().hint())),
        Line::from(""),
    ];
    let features = [
        t!("home_feature_sources"),
        t!("home_feature_types"),
        t!("home_feature_difficulty"),
        t!("home_feature_export"),
    ];
    lines.extend(features.into_iter().map(|feature| {
        Line::from(vec![
            Span::styled("  ✓ ", theme().success()),
            Span::styled(feature.to_string(), theme().normal()),
        ])
    }));

    let hero = Paragraph::new(lines)
        .block(panel(t!("home_welcome")))
        .wrap(Wrap { trim: false });
    frame.render_widget(hero, hero_area);

    let items: Vec<ListItem> = HomeItem::iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == state.menu_state.selected() {
                theme().selected()
            } else {
                theme().normal()
            };
            ListItem::new(item.label()).style(style)
        })
        .collect();

    let menu_list = List::new(items)
        .block(panel(t!("select_option")))
        .highlight_style(theme().selected())
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(menu_list, menu_area, &mut state.menu_state.list_state);

    render_hint(&t!("menu_hint"), frame, footer);
}
