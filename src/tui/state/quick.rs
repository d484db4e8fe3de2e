//! 快速出题表单项

use crate::quick::QuickQuiz;

/// 快速出题页的可聚焦项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickItem {
    Topic,
    Material,
    Difficulty,
    QuestionType,
    Count,
    Generate,
    /// 有结果时出现，清空重来
    Reset,
}

impl QuickItem {
    /// 全部可聚焦项，按显示顺序
    pub fn items_for(quick: &QuickQuiz) -> Vec<QuickItem> {
        let mut items = vec![
            QuickItem::Topic,
            QuickItem::Material,
            QuickItem::Difficulty,
            QuickItem::QuestionType,
            QuickItem::Count,
            QuickItem::Generate,
        ];
        if !quick.generated.is_empty() {
            items.push(QuickItem::Reset);
        }
        items
    }

    pub fn is_option(&self) -> bool {
        matches!(
            self,
            QuickItem::Difficulty | QuickItem::QuestionType | QuickItem::Count
        )
    }
}
