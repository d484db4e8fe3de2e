//! 首页菜单与屏幕

use crate::tui::state::selection::Selectable;
use crate::tui::theme::config::MENU_ITEM_COUNT;
use ratatui::widgets::ListState;

/// 屏幕枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// 首页（产品介绍）
    #[default]
    Home,
    /// 出题向导
    Wizard,
    /// 快速出题
    Quick,
    /// 退出确认
    Exit,
}

/// 首页菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    /// 新建测验
    NewQuiz,
    /// 快速出题
    QuickQuiz,
    /// 退出
    Exit,
}

const HOME_ITEMS: [HomeItem; MENU_ITEM_COUNT] = [HomeItem::NewQuiz, HomeItem::QuickQuiz, HomeItem::Exit];

impl HomeItem {
    /// 获取显示文本
    pub fn label(&self) -> String {
        match self {
            HomeItem::NewQuiz => rust_i18n::t!("menu_new_quiz").to_string(),
            HomeItem::QuickQuiz => rust_i18n::t!("menu_quick_quiz").to_string(),
            HomeItem::Exit => rust_i18n::t!("menu_exit").to_string(),
        }
    }

    /// 迭代所有菜单项
    pub fn iter() -> std::array::IntoIter<HomeItem, MENU_ITEM_COUNT> {
        HOME_ITEMS.into_iter()
    }

    /// 按索引取菜单项
    pub fn at(index: usize) -> HomeItem {
        HOME_ITEMS[index % MENU_ITEM_COUNT]
    }
}

/// 菜单状态
#[derive(Debug)]
pub struct MenuState {
    /// List 组件状态
    pub list_state: ListState,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            list_state: ListState::default().with_selected(Some(0)),
        }
    }
}

impl MenuState {
    /// 当前选中的菜单项
    pub fn selected_item(&self) -> HomeItem {
        HomeItem::at(self.selected())
    }
}

impl Selectable for MenuState {
    fn count(&self) -> usize {
        MENU_ITEM_COUNT
    }

    fn list_state(&self) -> &ListState {
        &self.list_state
    }

    fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_wraps_around() {
        let mut menu = MenuState::default();
        assert_eq!(menu.selected_item(), HomeItem::NewQuiz);
        menu.next();
        assert_eq!(menu.selected_item(), HomeItem::QuickQuiz);
        menu.next();
        assert_eq!(menu.selected_item(), HomeItem::Exit);
        menu.next();
        assert_eq!(menu.selected_item(), HomeItem::NewQuiz);
        menu.prev();
        assert_eq!(menu.selected_item(), HomeItem::Exit);
    }
}
