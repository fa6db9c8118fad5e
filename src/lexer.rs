//! Line-oriented lexer for curly-brace sources.
//!
//! The scanner never builds a syntax tree. It only needs to know, for every
//! line, which characters are code and which are comment text, and how many
//! braces and parentheses the code part opens and closes. String and raw
//! literal contents are part of the code text but never count as delimiters
//! or comment starts.
//!
//! State is carried between lines so that raw literals (backtick-delimited)
//! and block comments may span several lines:
//!
//! ```text
//! Normal ──"/'──▶ InString ──"/'──▶ Normal        (ends at end of line)
//! Normal ──`────▶ InRawLiteral ──`──▶ Normal       (may span lines)
//! Normal ──//───▶ InLineComment ──EOL──▶ Normal
//! Normal ──/*───▶ InBlockComment ──*/──▶ Normal    (may span lines)
//! ```

/// Lexer state at a character boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Normal,
    /// Inside an interpreted string or rune literal opened by `quote`.
    InString { quote: char },
    InRawLiteral,
    InLineComment,
    InBlockComment,
}

/// Result of lexing one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexedLine {
    /// The line with all comment text removed, trimmed.
    pub code: String,
    /// Comment text found on this line, one entry per comment segment,
    /// markers stripped and trimmed.
    pub comments: Vec<String>,
    /// Raw literal delimiters seen outside strings and comments.
    pub backticks: usize,
    pub open_braces: usize,
    pub close_braces: usize,
    pub open_parens: usize,
    pub close_parens: usize,
}

impl LexedLine {
    /// True when the line has no code, only comment text (possibly empty).
    pub fn is_comment_only(&self) -> bool {
        self.code.is_empty() && !self.comments.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.code.is_empty() && self.comments.is_empty()
    }
}

#[derive(Debug)]
pub struct Lexer {
    state: LexState,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            state: LexState::Normal,
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// Lex one line (without its terminator), advancing the carried state.
    pub fn feed_line(&mut self, line: &str) -> LexedLine {
        let mut out = LexedLine::default();
        let mut code = String::with_capacity(line.len());
        let mut comment = String::new();
        // A block comment still open from a previous line continues here.
        let mut in_comment_segment = self.state == LexState::InBlockComment;

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match self.state {
                LexState::Normal => match c {
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        self.state = LexState::InLineComment;
                        in_comment_segment = true;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.state = LexState::InBlockComment;
                        in_comment_segment = true;
                    }
                    '"' | '\'' => {
                        self.state = LexState::InString { quote: c };
                        code.push(c);
                    }
                    '`' => {
                        self.state = LexState::InRawLiteral;
                        out.backticks += 1;
                        code.push(c);
                    }
                    _ => {
                        match c {
                            '{' => out.open_braces += 1,
                            '}' => out.close_braces += 1,
                            '(' => out.open_parens += 1,
                            ')' => out.close_parens += 1,
                            _ => {}
                        }
                        code.push(c);
                    }
                },
                LexState::InString { quote } => {
                    code.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            code.push(escaped);
                        }
                    } else if c == quote {
                        self.state = LexState::Normal;
                    }
                }
                LexState::InRawLiteral => {
                    code.push(c);
                    if c == '`' {
                        out.backticks += 1;
                        self.state = LexState::Normal;
                    }
                }
                LexState::InLineComment => comment.push(c),
                LexState::InBlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.state = LexState::Normal;
                        push_segment(&mut out.comments, &mut comment, true);
                        in_comment_segment = false;
                        // Separate code on either side of an inline block comment.
                        code.push(' ');
                    } else {
                        comment.push(c);
                    }
                }
            }
        }

        match self.state {
            LexState::InLineComment => {
                push_segment(&mut out.comments, &mut comment, false);
                self.state = LexState::Normal;
            }
            LexState::InBlockComment if in_comment_segment => {
                push_segment(&mut out.comments, &mut comment, true);
            }
            // Interpreted strings cannot span lines.
            LexState::InString { .. } => self.state = LexState::Normal,
            _ => {}
        }

        out.code = code.trim().to_string();
        out
    }
}

/// Push a comment segment. Block comment segments that are empty after
/// trimming are dropped; empty `//` lines are kept.
fn push_segment(comments: &mut Vec<String>, text: &mut String, block: bool) {
    let trimmed = text.trim();
    if !(block && trimmed.is_empty()) {
        comments.push(trimmed.to_string());
    }
    text.clear();
}
