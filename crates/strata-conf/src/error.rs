use std::fmt::Display;

/// Failure raised while parsing a configuration buffer.
///
/// Carries the byte offset where the parse stopped and the 1-based
/// line/column plus the text of the offending line, recovered from the
/// source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the source buffer where the failure was detected.
    pub offset: usize,
    /// 1-based line number of the offset.
    pub line: usize,
    /// 1-based column of the offset within its line.
    pub column: usize,
    /// Full text of the line containing the offset.
    pub line_text: String,
}

impl ParseError {
    /// Build an error for `offset`, locating it in `src`.
    ///
    /// The buffer is scanned once, at construction time; `\r\n` and
    /// `\n\r` pairs count as a single line break.
    pub(crate) fn at(src: &[u8], offset: usize, message: impl Into<String>) -> Self {
        let mut line = 1usize;
        let mut column = 1usize;
        let mut line_start = 0usize;
        let mut line_end = 0usize;

        let mut i = 0;
        while i < src.len() {
            let c = src[i];
            if i < offset {
                if i + 1 < src.len()
                    && ((c == b'\n' && src[i + 1] == b'\r')
                        || (c == b'\r' && src[i + 1] == b'\n'))
                {
                    line += 1;
                    column = 1;
                    i += 1;
                    if i + 1 < src.len() {
                        line_start = i + 1;
                    }
                    i += 1;
                    continue;
                }
                if c == b'\n' || c == b'\r' {
                    line += 1;
                    column = 1;
                    if i + 1 < src.len() {
                        line_start = i + 1;
                    }
                    i += 1;
                    continue;
                }
                column += 1;
            } else if c == b'\n' || c == b'\r' {
                line_end = i;
                break;
            }
            i += 1;
        }

        if line_end <= line_start && src.len() >= line_start {
            line_end = src.len();
        }

        ParseError {
            message: message.into(),
            offset,
            line,
            column,
            line_text: String::from_utf8_lossy(&src[line_start..line_end]).into_owned(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the "near" part is useless when the offending line is empty
        if self.line_text.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(
            f,
            "{}\nerror occurred near line {}, position {}: {}",
            self.message, self.line, self.column, self.line_text
        )
    }
}

impl std::error::Error for ParseError {}
