//! 主题模块
//!
//! 统一的配色与样式。难度、按钮、徽章等样式都从这里取。

use crate::quiz::Difficulty;
use ratatui::style::{Color, Modifier, Style};

/// 布局与控件常量
pub mod config {
    /// 列表高亮前缀
    pub const HIGHLIGHT_SYMBOL: &str = "▶ ";
    /// 首页菜单项数量
    pub const MENU_ITEM_COUNT: usize = 3;
    /// 生成中动画帧
    pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    /// 结果页翻页行数
    pub const RESULTS_PAGE_ROWS: u16 = 10;
    /// 多行文本预览的最大行数
    pub const TEXT_PREVIEW_LINES: usize = 6;
}

/// 主题颜色配置
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// 背景色
    pub bg: Color,
    /// 前景色
    pub fg: Color,
    /// 强调色
    pub accent: Color,
    /// 选中项背景色
    pub selected_bg: Color,
    /// 选中项前景色
    pub selected_fg: Color,
    /// 成功色，也用于“简单”
    pub success: Color,
    /// 警告色，也用于“中等”
    pub warning: Color,
    /// 错误色，也用于“困难”
    pub error: Color,
    /// 次要文字色
    pub hint: Color,
    /// 禁用控件色
    pub disabled: Color,
    /// 边框色
    pub border: Color,
    /// 标题颜色
    pub title: Color,
}

impl Theme {
    /// 普通文本样式
    pub fn normal(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// 标题样式
    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.title)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 强调文本
    pub fn accent(&self) -> Style {
        Style::new().fg(self.accent).bg(self.bg)
    }

    /// 选中项样式
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 输入中的字段
    pub fn editing(&self) -> Style {
        self.selected().add_modifier(Modifier::ITALIC)
    }

    /// 不可用的按钮
    pub fn disabled(&self) -> Style {
        Style::new()
            .fg(self.disabled)
            .bg(self.bg)
            .add_modifier(Modifier::DIM)
    }

    /// 边框样式
    pub fn border(&self) -> Style {
        Style::new().fg(self.border).bg(self.bg)
    }

    /// 提示文本样式
    pub fn hint(&self) -> Style {
        Style::new().fg(self.hint).bg(self.bg)
    }

    /// 成功样式
    pub fn success(&self) -> Style {
        Style::new().fg(self.success).bg(self.bg)
    }

    /// 警告样式
    pub fn warning(&self) -> Style {
        Style::new().fg(self.warning).bg(self.bg)
    }

    /// 错误样式
    pub fn error(&self) -> Style {
        Style::new().fg(self.error).bg(self.bg)
    }

    /// 进度条样式
    pub fn progress(&self) -> Style {
        Style::new().fg(self.accent).bg(self.bg)
    }

    /// 难度徽章：简单=绿，中等=黄，困难=红
    pub fn difficulty(&self, difficulty: Difficulty) -> Style {
        let color = match difficulty {
            Difficulty::Easy => self.success,
            Difficulty::Medium => self.warning,
            Difficulty::Hard => self.error,
        };
        Style::new()
            .fg(color)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 题型徽章
    pub fn badge(&self) -> Style {
        Style::new()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 正确选项
    pub fn correct(&self) -> Style {
        self.success().add_modifier(Modifier::BOLD)
    }
}

/// 全局主题实例
pub static THEME: Theme = Theme {
    bg: Color::Reset,
    fg: Color::White,
    accent: Color::Blue,
    selected_bg: Color::Blue,
    selected_fg: Color::White,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    hint: Color::Gray,
    disabled: Color::DarkGray,
    border: Color::Blue,
    title: Color::LightBlue,
};

/// 获取全局主题引用
pub fn theme() -> &'static Theme {
    &THEME
}
