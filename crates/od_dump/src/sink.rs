use core::fmt;

const SPACES: &str = "                                ";

/// An indenting text writer.
///
/// Every line after a newline starts with `indent * indent_width` spaces; the
/// first line is written at the writer's current position. With a limit set,
/// output past `limit` characters is dropped silently.
///
/// # Examples
///
/// ```
/// use od_dump::TextSink;
///
/// let mut out = String::new();
/// let mut sink = TextSink::new(&mut out, 2);
/// sink.write_str("a:").unwrap();
/// sink.indent();
/// sink.write_str("\nb\nc").unwrap();
/// assert_eq!(out, "a:\n  b\n  c");
/// ```
pub struct TextSink<'w> {
    out: &'w mut dyn fmt::Write,
    indent: usize,
    indent_width: usize,
    written: usize,
    limit: Option<usize>,
    line_start: bool,
}

impl<'w> TextSink<'w> {
    pub fn new(out: &'w mut dyn fmt::Write, indent_width: usize) -> Self {
        Self {
            out,
            indent: 0,
            indent_width,
            written: 0,
            limit: None,
            line_start: false,
        }
    }

    /// Drops everything written after `limit` characters.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn write_str(&mut self, text: &str) -> fmt::Result {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.emit("\n")?;
                self.line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.line_start {
                self.line_start = false;
                self.write_indent()?;
            }
            self.emit(line)?;
        }
        Ok(())
    }

    #[inline]
    pub fn newline(&mut self) -> fmt::Result {
        self.write_str("\n")
    }

    #[inline]
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    #[inline]
    pub fn unindent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    #[inline]
    pub fn indent_level(&self) -> usize {
        self.indent
    }

    #[inline]
    pub fn set_indent_level(&mut self, indent: usize) {
        self.indent = indent;
    }

    /// Characters written so far, indentation included.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns `true` once the limit is reached; later writes are dropped.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.written >= limit)
    }

    fn write_indent(&mut self) -> fmt::Result {
        let mut remaining = self.indent * self.indent_width;
        while remaining > 0 {
            let chunk = remaining.min(SPACES.len());
            self.emit(&SPACES[..chunk])?;
            remaining -= chunk;
        }
        Ok(())
    }

    fn emit(&mut self, text: &str) -> fmt::Result {
        let Some(limit) = self.limit else {
            self.written += text.chars().count();
            return self.out.write_str(text);
        };
        let room = limit.saturating_sub(self.written);
        if room == 0 {
            return Ok(());
        }
        let (part, count) = match text.char_indices().nth(room) {
            Some((end, _)) => (&text[..end], room),
            None => (text, text.chars().count()),
        };
        self.written += count;
        self.out.write_str(part)
    }
}

impl fmt::Write for TextSink<'_> {
    #[inline]
    fn write_str(&mut self, text: &str) -> fmt::Result {
        TextSink::write_str(self, text)
    }
}

impl fmt::Debug for TextSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSink")
            .field("indent", &self.indent)
            .field("indent_width", &self.indent_width)
            .field("written", &self.written)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::fmt::Write;

    use super::TextSink;

    #[test]
    fn embedded_newlines_are_indented() {
        let mut out = String::new();
        let mut sink = TextSink::new(&mut out, 4).with_indent(1);
        sink.write_str("first\nsecond").unwrap();
        sink.unindent();
        sink.newline().unwrap();
        write!(sink, "{}", 3).unwrap();
        assert_eq!(out, "first\n    second\n3");
    }

    #[test]
    fn blank_lines_carry_no_indent() {
        let mut out = String::new();
        let mut sink = TextSink::new(&mut out, 2).with_indent(2);
        sink.write_str("a\n\nb").unwrap();
        assert_eq!(out, "a\n\n    b");
    }

    #[test]
    fn limit_drops_silently() {
        let mut out = String::new();
        let mut sink = TextSink::new(&mut out, 2).with_limit(Some(5));
        sink.write_str("héllo world").unwrap();
        assert!(sink.is_full());
        sink.write_str("more").unwrap();
        assert_eq!(sink.written(), 5);
        assert_eq!(out, "héllo");
    }

    #[test]
    fn deep_indent_spans_chunks() {
        let mut out = String::new();
        let mut sink = TextSink::new(&mut out, 10).with_indent(5);
        sink.write_str("\nx").unwrap();
        assert_eq!(out.len(), 1 + 50 + 1);
    }
}
