//! Statement splitting for MySQL scripts
//!
//! Splits a raw script on `;` while ignoring semicolons that sit inside
//! string literals, `--` line comments, or a `COMMENT '...'` clause.
//!
//! The scan is a single left-to-right pass over the bytes of the script with
//! constant-size state. Every character the splitter reacts to is ASCII, so
//! every slice taken here lands on a UTF-8 boundary.

use tracing::trace;

use crate::util::ends_with_ci;

/// Quote/comment state carried across the scan
#[derive(Debug, Default, Clone, Copy)]
struct ScanState {
    in_single_quote: bool,
    in_double_quote: bool,
    in_line_comment: bool,
}

impl ScanState {
    fn is_plain(&self) -> bool {
        !self.in_single_quote && !self.in_double_quote && !self.in_line_comment
    }
}

/// Quote pair seen after the last `COMMENT` keyword of the current statement
///
/// The keyword is matched anywhere in the statement text, quoted or not. The
/// first unescaped `'` or `"` after it fixes the pair's quote kind; the next
/// unescaped quote of that kind closes the pair.
#[derive(Debug, Default, Clone, Copy)]
struct CommentClause {
    seen: bool,
    quote: Option<u8>,
    closed: bool,
}

impl CommentClause {
    fn observe_quote(&mut self, ch: u8) {
        if !self.seen || self.closed {
            return;
        }
        match self.quote {
            None => self.quote = Some(ch),
            Some(open) if open == ch => self.closed = true,
            Some(_) => {}
        }
    }

    /// Whether a plain `;` ends the statement.
    ///
    /// Without a `COMMENT` keyword it always does. With one, only after the
    /// quote pair following the last keyword has closed; otherwise the
    /// statement keeps accumulating.
    fn allows_close(&self) -> bool {
        !self.seen || self.closed
    }
}

/// Split a script into trimmed statements with their terminating `;` removed.
///
/// A trailing fragment without a `;` is still returned as the last statement.
/// Statements that are empty after trimming (for example `;;`) are dropped.
pub fn split_statements(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut statements = Vec::with_capacity(text.len() / 80 + 1);
    let mut state = ScanState::default();
    let mut clause = CommentClause::default();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        let escaped = i > 0 && bytes[i - 1] == b'\\';

        if (b == b'T' || b == b't') && ends_with_ci(&bytes[start..=i], b"COMMENT") {
            clause = CommentClause {
                seen: true,
                ..CommentClause::default()
            };
        } else if (b == b'\'' || b == b'"') && !escaped {
            clause.observe_quote(b);
        }

        match b {
            b'\'' if !state.in_double_quote && !state.in_line_comment => {
                if escaped {
                    continue;
                }
                state.in_single_quote = !state.in_single_quote;
            }
            b'"' if !state.in_single_quote && !state.in_line_comment => {
                if escaped {
                    continue;
                }
                state.in_double_quote = !state.in_double_quote;
            }
            _ => {}
        }

        if !state.in_single_quote && !state.in_double_quote {
            if b == b'-' && bytes.get(i + 1) == Some(&b'-') {
                state.in_line_comment = true;
            } else if state.in_line_comment && b == b'\n' {
                state.in_line_comment = false;
            }
        }

        if b != b';' || !state.is_plain() {
            continue;
        }

        if clause.allows_close() {
            push_statement(&mut statements, &text[start..=i]);
            start = i + 1;
            clause = CommentClause::default();
        } else {
            trace!(offset = i, "semicolon kept inside COMMENT clause");
        }
    }

    if start < text.len() {
        push_statement(&mut statements, &text[start..]);
    }

    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix(';').unwrap_or(trimmed).trim();
    if !body.is_empty() {
        statements.push(body.to_string());
    }
}
