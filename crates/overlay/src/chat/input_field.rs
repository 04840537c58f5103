pub(crate) const MAX_LINE_CHARS: usize = 256;

/// Single-line text entry collaborating with the chat controller. The
/// controller issues clear/focus/placeholder commands; the host loop reads
/// the focus flag to gate its own hotkeys.
#[derive(Debug)]
pub struct InputField {
    buffer: String,
    focused: bool,
    placeholder: &'static str,
}

impl InputField {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            buffer: String::new(),
            focused: false,
            placeholder,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn set_placeholder(&mut self, placeholder: &'static str) {
        self.placeholder = placeholder;
    }

    /// Appends printable characters up to the line cap. Returns true when
    /// at least one character landed in the buffer.
    pub fn push_printable(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            if self.buffer.chars().count() >= MAX_LINE_CHARS {
                break;
            }
            self.buffer.push(ch);
            changed = true;
        }
        changed
    }

    /// Removes the last character. Returns true when the buffer changed.
    pub fn backspace(&mut self) -> bool {
        self.buffer.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_text_lands_and_control_chars_are_dropped() {
        let mut field = InputField::new("type here");
        assert!(field.push_printable("a\nb\t"));
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn push_reports_unchanged_for_control_only_input() {
        let mut field = InputField::new("type here");
        assert!(!field.push_printable("\n\r\t"));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn buffer_is_capped_at_line_limit() {
        let mut field = InputField::new("type here");
        let over_limit = "x".repeat(MAX_LINE_CHARS + 10);
        field.push_printable(&over_limit);
        assert_eq!(field.text().chars().count(), MAX_LINE_CHARS);
    }

    #[test]
    fn backspace_is_safe_on_empty_buffer() {
        let mut field = InputField::new("type here");
        field.push_printable("ab");
        assert!(field.backspace());
        assert!(field.backspace());
        assert!(!field.backspace());
        assert_eq!(field.text(), "");
    }

    #[test]
    fn focus_and_placeholder_round_trip() {
        let mut field = InputField::new("closed");
        assert!(!field.is_focused());
        field.focus();
        assert!(field.is_focused());
        field.set_placeholder("open");
        assert_eq!(field.placeholder(), "open");
        field.unfocus();
        assert!(!field.is_focused());
    }
}
