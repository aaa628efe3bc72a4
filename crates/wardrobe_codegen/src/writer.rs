//! Indentation-aware Solidity source builder.

const INDENT: &str = "    ";

/// Accumulates source lines with block indentation.
#[derive(Debug, Default)]
pub struct SolidityWriter {
    buf: String,
    depth: usize,
}

impl SolidityWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes a line and indents what follows (`... {`).
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedents and writes a closing line (`}`, `} else {`).
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Writes a line between two blocks (`} else {`).
    pub fn reopen(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
        self.depth += 1;
    }

    /// Writes a multi-line block verbatim at the current depth.
    pub fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    /// Returns the source text.
    #[must_use]
    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced blocks");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting() {
        let mut w = SolidityWriter::new();
        w.open("contract A {");
        w.open("function f() external {");
        w.open("if (a) {");
        w.line("x = 1;");
        w.reopen("} else {");
        w.line("x = 2;");
        w.close("}");
        w.close("}");
        w.blank();
        w.close("}");

        assert_eq!(
            w.finish(),
            "contract A {\n    function f() external {\n        if (a) {\n            x = 1;\n        } else {\n            x = 2;\n        }\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_block_keeps_empty_lines_unindented() {
        let mut w = SolidityWriter::new();
        w.open("{");
        w.block("a;\n\nb;");
        w.close("}");
        assert_eq!(w.finish(), "{\n    a;\n\n    b;\n}\n");
    }
}
