//! Line writer with scoped indentation

const INDENT: &str = "    ";

/// Accumulates source lines at an explicit indentation depth
///
/// Depth only changes through [`IndentWriter::indented`] and
/// [`IndentWriter::braced`], which restore it when the block ends.
#[derive(Debug, Default)]
pub struct IndentWriter {
    buffer: String,
    depth: usize,
}

impl IndentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth; blank lines carry no indentation
    pub fn line(&mut self, text: &str) {
        if !text.trim().is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(INDENT);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Write an empty line
    pub fn blank(&mut self) {
        self.line("");
    }

    /// Run `body` one level deeper
    pub fn indented<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    /// Write `{`, run `body` one level deeper, then write `}`
    pub fn braced<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line("{");
        self.indented(body);
        self.line("}");
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
