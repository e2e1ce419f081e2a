use crate::error::BlueprintError;

/// Line-oriented text accumulator with an indentation depth.
///
/// Blocks opened through [`Generator::push_in`] are always closed at the depth
/// they were opened at, so backends never balance braces by hand.
#[derive(Debug)]
pub struct Generator {
    buffer: String,
    depth:  usize,
    indent: &'static str,
}

impl Generator {
    /// `indent` is the text written once per depth level, e.g. `"\t"`.
    pub fn new(indent: &'static str) -> Self {
        Generator {
            buffer: String::new(),
            depth:  0,
            indent,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Appends one line at the current depth. An empty `text` writes a bare
    /// newline without indentation.
    pub fn push_line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(self.indent);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    pub fn push_blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Starts a new section: writes a blank line unless the buffer is empty or
    /// already ends with one.
    pub fn separate(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with("\n\n") {
            self.push_blank();
        }
    }

    /// Runs `body` one level deeper.
    pub fn indented<F>(&mut self, body: F) -> Result<(), BlueprintError>
    where
        F: FnOnce(&mut Generator) -> Result<(), BlueprintError>,
    {
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    /// Writes `open`, the indented `body`, then `close` at the outer depth.
    pub fn push_in_with<F>(&mut self, open: &str, close: &str, body: F) -> Result<(), BlueprintError>
    where
        F: FnOnce(&mut Generator) -> Result<(), BlueprintError>,
    {
        self.push_line(open);
        self.indented(body)?;
        self.push_line(close);
        Ok(())
    }

    /// Writes `head {`, the indented `body`, then `}`.
    pub fn push_in<F>(&mut self, head: &str, body: F) -> Result<(), BlueprintError>
    where
        F: FnOnce(&mut Generator) -> Result<(), BlueprintError>,
    {
        let open = if head.is_empty() { "{".to_string() } else { format!("{} {{", head) };
        self.push_in_with(&open, "}", body)
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
