//! Character data accumulation.
//!
//! Character events for the current node collect in a [`TextBuffer`] until a
//! child is appended or the node ends. The buffer is then taken whole and
//! split into runs of bounded length.

/// Pending character data of the current node.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// An empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Append character data.
    pub fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Take everything pending, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

/// Returns true for the XML whitespace characters.
#[must_use]
pub const fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Split `text` into consecutive pieces of at most `max_len` characters.
///
/// Lengths count characters, not bytes, so no piece splits a character.
/// The pieces concatenate back to `text`; an empty input yields no pieces.
#[must_use]
pub fn split_chunks(text: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max_len + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_len)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_counts_characters() {
        let text = "aé€😀b";
        let chunks = split_chunks(text, 2);
        assert_eq!(chunks, ["aé", "€😀", "b"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_split_exact_multiple() {
        assert_eq!(split_chunks("abcd", 2), ["ab", "cd"]);
        assert!(split_chunks("", 5).is_empty());
    }

    #[test]
    fn test_buffer_take_empties() {
        let mut buffer = TextBuffer::new();
        buffer.push("Hello, ");
        buffer.push("world");
        assert_eq!(buffer.take(), "Hello, world");
        assert!(buffer.is_empty());
    }
}
