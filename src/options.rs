/// Which scheme grammar a document is decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grammar {
    /// Commented JSON first, single line schemes when the text is not JSON.
    #[default]
    Auto,
    Json,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub grammar: Grammar,
    /// Read the input as a file when it names an existing one.
    pub read_files: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_read_files(mut self, read_files: bool) -> Self {
        self.read_files = read_files;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            grammar: Grammar::default(),
            read_files: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// JSON indentation; zero spaces writes a single line.
    pub indent: Indent,
    /// Write `max` instead of the numeric extreme for unbounded fields.
    pub sentinels: bool,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_sentinels(mut self, sentinels: bool) -> Self {
        self.sentinels = sentinels;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            sentinels: true,
        }
    }
}
