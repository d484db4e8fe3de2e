//! 通用选择状态

use ratatui::widgets::ListState;

/// 可选择列表通用行为，选择循环滚动
pub trait Selectable {
    /// 总选项数
    fn count(&self) -> usize;
    /// 获取列表状态引用
    fn list_state(&self) -> &ListState;
    /// 获取列表状态可变引用
    fn list_state_mut(&mut self) -> &mut ListState;

    /// 选择下一个
    fn next(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        let i = self.selected();
        self.list_state_mut().select(Some((i + 1) % count));
    }

    /// 选择上一个
    fn prev(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        let i = self.selected();
        let prev = if i == 0 { count - 1 } else { i - 1 };
        self.list_state_mut().select(Some(prev));
    }

    /// 获取当前选中索引
    fn selected(&self) -> usize {
        self.list_state().selected().unwrap_or(0)
    }
}
