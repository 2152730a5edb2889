/// Line counting results from the plain text scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTally {
    pub total_lines: usize,
    pub non_blank_lines: usize,
}

/// Count total and non-blank lines in source text.
///
/// Lines are terminated by `\n` or `\r\n`; a trailing terminator does
/// not open an extra line, and text without a final terminator still
/// counts its last partial line. A line is blank if it holds nothing
/// but spaces and tabs.
pub fn classify_lines(text: &str) -> LineTally {
    let mut total = 0;
    let mut blank = 0;

    for line in split_lines(text) {
        total += 1;
        if is_blank(line) {
            blank += 1;
        }
    }

    LineTally {
        total_lines: total,
        non_blank_lines: total - blank,
    }
}

/// Split on `\n`, dropping the empty segment a trailing terminator
/// would otherwise produce. Carriage returns stay attached to their
/// line and are handled by `is_blank`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut segments: Vec<&str> = text.split('\n').collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    segments.into_iter()
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t' || c == '\r')
}
