//! 向导表单状态
//!
//! 每个步骤的页面是一列可聚焦项（输入框、选项、按钮）。这里只保存焦点、
//! 输入模式和页面提示，向导数据本身在 [`WizardState`] 中。

use crate::quiz::ConfigId;
use crate::tui::state::input::InputState;
use crate::tui::theme::config::RESULTS_PAGE_ROWS;
use crate::wizard::{WizardState, WizardStep};

/// 表单中的可聚焦项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItem {
    /// 标题
    Title,
    /// 描述
    Description,
    /// 学习材料文本
    MaterialText,
    /// 添加文件（输入路径）
    AddFile,
    /// 已上传文件
    File(usize),
    /// YouTube 链接
    YoutubeUrl,
    /// 题型
    ConfigType(ConfigId),
    /// 数量
    ConfigQuantity(ConfigId),
    /// 难度
    ConfigDifficulty(ConfigId),
    /// 删除该配置
    RemoveConfig(ConfigId),
    /// 添加题型
    AddConfig,
    /// 导出题目（不含答案）
    ExportQuestions,
    /// 导出题目与答案
    ExportAnswerKey,
    /// 新建测验
    NewQuiz,
    /// 上一步
    Back,
    /// 继续 / 生成
    Continue,
}

impl FormItem {
    /// 当前步骤的全部可聚焦项，按显示顺序
    pub fn items_for(wizard: &WizardState) -> Vec<FormItem> {
        match wizard.step {
            WizardStep::Topic => vec![FormItem::Title, FormItem::Description, FormItem::Continue],
            WizardStep::Material => {
                let mut items = vec![FormItem::MaterialText, FormItem::AddFile];
                items.extend((0..wizard.uploads.len()).map(FormItem::File));
                items.extend([FormItem::YoutubeUrl, FormItem::Back, FormItem::Continue]);
                items
            }
            WizardStep::Configuration => {
                let can_remove = wizard.configs.can_remove();
                let mut items = Vec::new();
                for entry in wizard.configs.entries() {
                    items.push(FormItem::ConfigType(entry.id));
                    items.push(FormItem::ConfigQuantity(entry.id));
                    items.push(FormItem::ConfigDifficulty(entry.id));
                    if can_remove {
                        items.push(FormItem::RemoveConfig(entry.id));
                    }
                }
                items.extend([FormItem::AddConfig, FormItem::Back, FormItem::Continue]);
                items
            }
            WizardStep::Results => vec![
                FormItem::ExportQuestions,
                FormItem::ExportAnswerKey,
                FormItem::NewQuiz,
            ],
        }
    }

    /// 是否为文本输入项
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            FormItem::Title
                | FormItem::Description
                | FormItem::MaterialText
                | FormItem::AddFile
                | FormItem::YoutubeUrl
        )
    }

    /// 输入是否允许换行
    pub fn is_multiline(&self) -> bool {
        matches!(self, FormItem::Description | FormItem::MaterialText)
    }

    /// 是否为左右切换的选项
    pub fn is_option(&self) -> bool {
        matches!(
            self,
            FormItem::ConfigType(_) | FormItem::ConfigQuantity(_) | FormItem::ConfigDifficulty(_)
        )
    }
}

/// 页面提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// 表单状态
#[derive(Debug, Default)]
pub struct WizardForm {
    /// 当前焦点索引
    pub selected: usize,
    /// 输入模式下的编辑缓冲区
    pub input: Option<InputState>,
    /// 结果页滚动偏移
    pub results_scroll: u16,
    /// 页面提示
    pub status: Option<StatusMessage>,
}

impl WizardForm {
    /// 换步骤时重置焦点与输入
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 选择下一个
    pub fn next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// 选择上一个
    pub fn prev(&mut self, count: usize) {
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                (self.selected - 1).min(count - 1)
            };
        }
    }

    /// 项目数量变化后保证焦点有效
    pub fn clamp(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// 聚焦指定项（若存在）
    pub fn focus(&mut self, items: &[FormItem], item: FormItem) {
        if let Some(index) = items.iter().position(|i| *i == item) {
            self.selected = index;
        }
    }

    /// 当前焦点项
    pub fn selected_item(&self, wizard: &WizardState) -> Option<FormItem> {
        FormItem::items_for(wizard).get(self.selected).copied()
    }

    /// 是否输入模式
    pub fn is_in_input_mode(&self) -> bool {
        self.input.is_some()
    }

    /// 进入输入模式
    pub fn enter_input_mode(&mut self, value: &str, multiline: bool) {
        self.input = Some(InputState::with_value(value, multiline));
    }

    /// 退出输入模式，返回编辑结果
    pub fn exit_input_mode(&mut self) -> Option<String> {
        self.input.take().map(|input| input.value().to_string())
    }

    /// 结果页上滚一页
    pub fn scroll_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(RESULTS_PAGE_ROWS);
    }

    /// 结果页下滚一页
    pub fn scroll_down(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(RESULTS_PAGE_ROWS);
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Info(message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Error(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::UploadedFile;
    use crate::wizard::Action;

    #[test]
    fn test_material_items_include_each_file() {
        let mut wizard = WizardState::default();
        wizard.step = WizardStep::Material;
        wizard.dispatch(Action::AddUpload(UploadedFile::new("a.pdf", "/a.pdf", 1)));
        wizard.dispatch(Action::AddUpload(UploadedFile::new("b.txt", "/b.txt", 1)));

        let items = FormItem::items_for(&wizard);
        assert_eq!(
            items,
            vec![
                FormItem::MaterialText,
                FormItem::AddFile,
                FormItem::File(0),
                FormItem::File(1),
                FormItem::YoutubeUrl,
                FormItem::Back,
                FormItem::Continue,
            ]
        );
    }

    #[test]
    fn test_single_config_has_no_remove_item() {
        let mut wizard = WizardState::default();
        wizard.step = WizardStep::Configuration;
        let items = FormItem::items_for(&wizard);
        assert!(!items.iter().any(|i| matches!(i, FormItem::RemoveConfig(_))));

        wizard.dispatch(Action::AddConfig);
        let items = FormItem::items_for(&wizard);
        assert_eq!(
            items
                .iter()
                .filter(|i| matches!(i, FormItem::RemoveConfig(_)))
                .count(),
            2
        );
    }

    #[test]
    fn test_item_kinds() {
        let id = ConfigId(1);
        assert!(FormItem::Title.is_input() && !FormItem::Title.is_multiline());
        assert!(FormItem::MaterialText.is_input() && FormItem::MaterialText.is_multiline());
        assert!(FormItem::AddFile.is_input());
        assert!(FormItem::ConfigQuantity(id).is_option());
        assert!(!FormItem::RemoveConfig(id).is_option());
        assert!(!FormItem::Continue.is_input() && !FormItem::Continue.is_option());
    }

    #[test]
    fn test_navigation_wraps_and_clamps() {
        let mut form = WizardForm::default();
        form.prev(3);
        assert_eq!(form.selected, 2);
        form.next(3);
        assert_eq!(form.selected, 0);

        form.selected = 6;
        form.clamp(4);
        assert_eq!(form.selected, 3);
    }

    #[test]
    fn test_input_mode_round_trip() {
        let mut form = WizardForm::default();
        form.enter_input_mode("Fotosintesis", false);
        assert!(form.is_in_input_mode());
        if let Some(input) = form.input.as_mut() {
            input.insert_char('!');
        }
        assert_eq!(form.exit_input_mode().as_deref(), Some("Fotosintesis!"));
        assert!(!form.is_in_input_mode());
    }
}
