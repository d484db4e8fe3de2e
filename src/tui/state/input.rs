//! 输入状态

use unicode_width::UnicodeWidthStr;

/// 文本输入状态，光标按字节偏移记录，始终落在字符边界
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    multiline: bool,
}

impl InputState {
    /// 新建单行输入
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用初始值创建，光标在末尾
    pub fn with_value(value: &str, multiline: bool) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.len(),
            multiline,
        }
    }

    /// 是否允许换行
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// 插入字符
    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// 插入粘贴文本；单行输入中换行会变成空格
    pub fn insert_str(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        let text = if self.multiline {
            text
        } else {
            text.replace('\n', " ")
        };
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// 插入换行，仅多行输入有效
    pub fn insert_newline(&mut self) {
        if self.multiline {
            self.insert_char('\n');
        }
    }

    /// 删除光标前字符
    pub fn delete_before_cursor(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    /// 删除光标后字符
    pub fn delete_after_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// 光标左移
    pub fn move_cursor_left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    /// 光标右移
    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// 移动到当前行首
    pub fn move_cursor_to_start(&mut self) {
        self.cursor = self.buffer[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    /// 移动到当前行尾
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.buffer[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.buffer.len());
    }

    /// 光标所在行号与行内显示列
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.buffer[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, before[line_start..].width())
    }

    /// 获取当前值
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// 光标切分的前后两段
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }

    /// 获取光标位置
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_multibyte_text() {
        let mut input = InputState::new();
        for c in "añb".chars() {
            input.insert_char(c);
        }
        input.move_cursor_left();
        input.delete_before_cursor();
        assert_eq!(input.value(), "ab");
        assert_eq!(input.cursor_position(), 1);

        input.delete_after_cursor();
        assert_eq!(input.value(), "a");
        input.move_cursor_right();
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_newline_only_in_multiline() {
        let mut single = InputState::with_value("judul", false);
        single.insert_newline();
        single.insert_str(" bab\n3");
        assert_eq!(single.value(), "judul bab 3");

        let mut multi = InputState::with_value("baris", true);
        multi.insert_newline();
        multi.insert_str("dua\r\ntiga");
        assert_eq!(multi.value(), "baris\ndua\ntiga");
        assert_eq!(multi.cursor_line_col(), (2, 4));
    }

    #[test]
    fn test_home_end_stay_on_current_line() {
        let mut input = InputState::with_value("satu\ndua", true);
        input.move_cursor_to_start();
        assert_eq!(input.cursor_position(), 5);
        input.move_cursor_left();
        input.move_cursor_to_start();
        assert_eq!(input.cursor_position(), 0);
        input.move_cursor_to_end();
        assert_eq!(input.cursor_position(), 4);
        assert_eq!(input.split_at_cursor(), ("satu", "\ndua"));
    }
}
