use memchr::memchr_iter;

use crate::constants::is_comment_line;

/// A document's lines with comment lines removed.
///
/// Blank lines are kept so that a line's index matches the name given to the
/// scheme decoded from it.
#[derive(Debug)]
pub struct ScanResult<'a> {
    pub lines: Vec<&'a str>,
    pub non_blank: usize,
}

impl<'a> ScanResult<'a> {
    /// The remaining lines joined back into one text, for the JSON grammar.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    /// Non-blank lines with their index in [`ScanResult::lines`].
    pub fn content_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines
            .iter()
            .copied()
            .enumerate()
            .map(|(idx, line)| (idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
    }
}

pub fn scan_lines(input: &str) -> ScanResult<'_> {
    let input = input.trim();
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut non_blank = 0;
    let mut start = 0;
    for idx in memchr_iter(b'\n', bytes) {
        push_line(&input[start..idx], &mut lines, &mut non_blank);
        start = idx + 1;
    }
    push_line(&input[start..], &mut lines, &mut non_blank);

    ScanResult { lines, non_blank }
}

fn push_line<'a>(line: &'a str, lines: &mut Vec<&'a str>, non_blank: &mut usize) {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if is_comment_line(line) {
        return;
    }
    if !line.trim().is_empty() {
        *non_blank += 1;
    }
    lines.push(line);
}
