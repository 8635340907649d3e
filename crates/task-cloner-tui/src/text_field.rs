/*
[INPUT]:  Keystrokes, pasted text, caret moves
[OUTPUT]: Editable value with a char-offset caret
[POS]:    Text field shared by the importer, editor and TUI prompts
[UPDATE]: When caret or editing rules change
*/

// The caret is a character offset, not a byte offset. `None` means the
// field has never been focused, in which case insertions append.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    caret: Option<usize>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field holding `value` with no tracked caret.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            caret: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole value. The caret is forgotten.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.caret = None;
    }

    pub fn caret(&self) -> Option<usize> {
        self.caret
    }

    pub fn set_caret(&mut self, caret: Option<usize>) {
        self.caret = caret.map(|pos| pos.min(self.char_len()));
    }

    /// Start tracking the caret at the end if it is not tracked yet.
    pub fn focus(&mut self) {
        if self.caret.is_none() {
            self.caret = Some(self.char_len());
        }
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert at the caret, or append when no caret is tracked. The caret
    /// ends up right after the inserted text.
    pub fn insert_str(&mut self, text: &str) {
        let pos = self.caret.unwrap_or_else(|| self.char_len());
        let byte = self.byte_index(pos);
        self.value.insert_str(byte, text);
        self.caret = Some(pos + text.chars().count());
    }

    pub fn backspace(&mut self) {
        let pos = self.caret.unwrap_or_else(|| self.char_len());
        if pos == 0 {
            self.caret = Some(0);
            return;
        }
        let byte = self.byte_index(pos - 1);
        self.value.remove(byte);
        self.caret = Some(pos - 1);
    }

    pub fn delete(&mut self) {
        let Some(pos) = self.caret else {
            return;
        };
        if pos < self.char_len() {
            let byte = self.byte_index(pos);
            self.value.remove(byte);
        }
    }

    pub fn move_left(&mut self) {
        let pos = self.caret.unwrap_or_else(|| self.char_len());
        self.caret = Some(pos.saturating_sub(1));
    }

    pub fn move_right(&mut self) {
        let pos = self.caret.unwrap_or_else(|| self.char_len());
        self.caret = Some((pos + 1).min(self.char_len()));
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.caret_line_col();
        let start = self.line_start(line);
        self.caret = Some(start);
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.caret_line_col();
        let start = self.line_start(line);
        let len = self.value.split('\n').nth(line).map_or(0, |l| l.chars().count());
        self.caret = Some(start + len);
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.caret_line_col();
        if line > 0 {
            self.move_to_line(line - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.caret_line_col();
        if line + 1 < self.value.split('\n').count() {
            self.move_to_line(line + 1, col);
        }
    }

    fn move_to_line(&mut self, line: usize, col: usize) {
        let len = self.value.split('\n').nth(line).map_or(0, |l| l.chars().count());
        self.caret = Some(self.line_start(line) + col.min(len));
    }

    fn line_start(&self, line: usize) -> usize {
        self.value
            .split('\n')
            .take(line)
            .map(|l| l.chars().count() + 1)
            .sum()
    }

    /// Zero-based line and column of the caret (end of text when untracked).
    pub fn caret_line_col(&self) -> (usize, usize) {
        let pos = self.caret.unwrap_or_else(|| self.char_len());
        let mut line = 0;
        let mut col = 0;
        for c in self.value.chars().take(pos) {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}
