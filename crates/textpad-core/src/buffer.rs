/// Glyph arena: the ordered, index-addressed character storage of a document.
use std::fmt;

/// Content of the line-break marker glyph.
pub const NEWLINE: char = '\n';

/// One buffer element: a character or a line-break marker plus its computed layout.
///
/// `line`, `x`, `y` and `width` are owned by the layout engine and are only
/// meaningful after the last mutation has been followed by a reflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The character, or [`NEWLINE`] for a line break.
    pub content: char,
    /// Position in the buffer (0-based, dense).
    pub index: usize,
    /// 1-based visual line.
    pub line: usize,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Measured advance in pixels (0 for line breaks).
    pub width: f32,
}

impl Glyph {
    fn new(content: char, index: usize) -> Self {
        Self {
            content,
            index,
            line: 0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
        }
    }

    /// True for the line-break marker.
    pub fn is_newline(&self) -> bool {
        self.content == NEWLINE
    }

    /// True for a plain space.
    pub fn is_space(&self) -> bool {
        self.content == ' '
    }

    /// True for glyphs that delimit word-wrap units.
    pub fn is_word_break(&self) -> bool {
        self.is_space() || self.is_newline()
    }

    /// Right edge in pixels.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Ordered glyph storage. Indices are always `0..len()` in storage order.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    glyphs: Vec<Glyph>,
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            glyphs: text
                .chars()
                .enumerate()
                .map(|(i, ch)| Glyph::new(ch, i))
                .collect(),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for glyph in &self.glyphs {
            f.write_char(glyph.content)?;
        }
        Ok(())
    }
}

impl TextBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { glyphs: Vec::new() }
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if the buffer holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    /// All glyphs in index order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Layout fields are written by the layout engine only.
    pub(crate) fn glyphs_mut(&mut self) -> &mut [Glyph] {
        &mut self.glyphs
    }

    /// Inserts a glyph for `ch` at `index`, shifting later glyphs by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_char(&mut self, index: usize, ch: char) -> &Glyph {
        assert!(
            index <= self.glyphs.len(),
            "insert position {} out of bounds (buffer has {} glyphs)",
            index,
            self.glyphs.len()
        );
        self.glyphs.insert(index, Glyph::new(ch, index));
        self.renumber_from(index + 1);
        &self.glyphs[index]
    }

    /// Inserts a line-break glyph at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_newline(&mut self, index: usize) -> &Glyph {
        self.insert_char(index, NEWLINE)
    }

    /// Inserts one glyph per char of `text` starting at `index`.
    /// Returns the number of glyphs inserted.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_str(&mut self, index: usize, text: &str) -> usize {
        assert!(
            index <= self.glyphs.len(),
            "insert position {} out of bounds (buffer has {} glyphs)",
            index,
            self.glyphs.len()
        );
        let before = self.glyphs.len();
        self.glyphs.splice(
            index..index,
            text.chars().enumerate().map(|(i, ch)| Glyph::new(ch, index + i)),
        );
        let count = self.glyphs.len() - before;
        self.renumber_from(index + count);
        count
    }

    /// Removes glyphs `[start, end)` and returns them with their original indices.
    ///
    /// No-op (empty result) when `start >= end` or the buffer is empty.
    ///
    /// # Panics
    ///
    /// Panics if `end > len()` on a non-empty range.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Vec<Glyph> {
        if start >= end || self.glyphs.is_empty() {
            return Vec::new();
        }
        assert!(
            end <= self.glyphs.len(),
            "range end {} out of bounds (buffer has {} glyphs)",
            end,
            self.glyphs.len()
        );
        let removed: Vec<Glyph> = self.glyphs.drain(start..end).collect();
        self.renumber_from(start);
        removed
    }

    /// Concatenated contents of glyphs `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len()`.
    pub fn slice(&self, start: usize, end: usize) -> String {
        assert!(start <= end, "invalid range: start ({start}) > end ({end})");
        assert!(
            end <= self.glyphs.len(),
            "range end {} out of bounds (buffer has {} glyphs)",
            end,
            self.glyphs.len()
        );
        self.glyphs[start..end].iter().map(|g| g.content).collect()
    }

    /// Whole document text.
    pub fn text(&self) -> String {
        self.to_string()
    }

    fn renumber_from(&mut self, from: usize) {
        for (i, glyph) in self.glyphs.iter_mut().enumerate().skip(from) {
            glyph.index = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_dense(buf: &TextBuffer) {
        for (i, g) in buf.glyphs().iter().enumerate() {
            assert_eq!(g.index, i, "glyph {:?} has stale index", g.content);
        }
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert!(buf.get(0).is_none());
    }

    #[test]
    fn test_from_str_assigns_dense_indices() {
        let buf = TextBuffer::from("ab\ncd");
        assert_eq!(buf.len(), 5);
        assert_dense(&buf);
        assert!(buf.get(2).unwrap().is_newline());
    }

    #[test]
    fn test_display_concatenates_contents() {
        let buf = TextBuffer::from("hello\nworld");
        assert_eq!(buf.to_string(), "hello\nworld");
        assert_eq!(buf.text(), "hello\nworld");
    }

    // ── Insert ───────────────────────────────────────────────────────

    #[test]
    fn test_insert_char_returns_glyph_and_shifts() {
        let mut buf = TextBuffer::from("ac");
        let g = buf.insert_char(1, 'b');
        assert_eq!(g.content, 'b');
        assert_eq!(g.index, 1);
        assert_eq!(buf.text(), "abc");
        assert_dense(&buf);
    }

    #[test]
    fn test_insert_at_end_and_start() {
        let mut buf = TextBuffer::new();
        buf.insert_char(0, 'b');
        buf.insert_char(1, 'c');
        buf.insert_char(0, 'a');
        assert_eq!(buf.text(), "abc");
        assert_dense(&buf);
    }

    #[test]
    fn test_insert_newline() {
        let mut buf = TextBuffer::from("abcd");
        let g = buf.insert_newline(2);
        assert!(g.is_newline());
        assert_eq!(g.width, 0.0);
        assert_eq!(buf.text(), "ab\ncd");
        assert_dense(&buf);
    }

    #[test]
    fn test_insert_str() {
        let mut buf = TextBuffer::from("ad");
        let count = buf.insert_str(1, "bc");
        assert_eq!(count, 2);
        assert_eq!(buf.text(), "abcd");
        assert_dense(&buf);
    }

    #[test]
    fn test_insert_str_unicode_counts_chars() {
        let mut buf = TextBuffer::from("ab");
        let count = buf.insert_str(1, "日本🌍");
        assert_eq!(count, 3);
        assert_eq!(buf.text(), "a日本🌍b");
        assert_dense(&buf);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_insert_out_of_bounds_panics() {
        let mut buf = TextBuffer::from("hello");
        buf.insert_char(6, 'x');
    }

    // ── Delete ───────────────────────────────────────────────────────

    #[test]
    fn test_delete_range_returns_removed_run() {
        let mut buf = TextBuffer::from("hello world");
        let removed = buf.delete_range(5, 11);
        let run: String = removed.iter().map(|g| g.content).collect();
        assert_eq!(run, " world");
        assert_eq!(removed[0].index, 5);
        assert_eq!(buf.text(), "hello");
        assert_dense(&buf);
    }

    #[test]
    fn test_delete_middle_renumbers_tail() {
        let mut buf = TextBuffer::from("ab\ncd");
        buf.delete_range(2, 3);
        assert_eq!(buf.text(), "abcd");
        assert_dense(&buf);
    }

    #[test]
    fn test_delete_empty_range_is_noop() {
        let mut buf = TextBuffer::from("hello");
        assert!(buf.delete_range(2, 2).is_empty());
        assert!(buf.delete_range(3, 1).is_empty());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_on_empty_buffer_is_noop() {
        let mut buf = TextBuffer::new();
        assert!(buf.delete_range(0, 1).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_delete_past_end_panics() {
        let mut buf = TextBuffer::from("hello");
        buf.delete_range(0, 100);
    }

    #[test]
    fn test_insert_then_delete_round_trip() {
        let original = TextBuffer::from("a\nbc d");
        for i in 0..=original.len() {
            let mut buf = original.clone();
            buf.insert_char(i, 'x');
            buf.delete_range(i, i + 1);
            assert_eq!(buf.text(), original.text());
            assert_dense(&buf);
        }
    }

    // ── Slice ────────────────────────────────────────────────────────

    #[test]
    fn test_slice() {
        let buf = TextBuffer::from("hello world");
        assert_eq!(buf.slice(0, 5), "hello");
        assert_eq!(buf.slice(2, 2), "");
        assert_eq!(buf.slice(0, 11), "hello world");
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_slice_inverted_panics() {
        let buf = TextBuffer::from("hello");
        let _ = buf.slice(3, 1);
    }

    // ── Glyph helpers ────────────────────────────────────────────────

    #[test]
    fn test_glyph_classification() {
        let buf = TextBuffer::from("a \n");
        assert!(!buf.get(0).unwrap().is_word_break());
        assert!(buf.get(1).unwrap().is_space());
        assert!(buf.get(1).unwrap().is_word_break());
        assert!(buf.get(2).unwrap().is_word_break());
    }
}
