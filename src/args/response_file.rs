//! Response files — `@path` arguments whose content is spliced into the
//! argument list.
//!
//! Format: tokens separated by ASCII whitespace (space, tab, CR, LF). A token
//! starting with `'` or `"` runs to the next occurrence of that same quote
//! character, or to the end of the file if there is none. There are no escape
//! sequences and no comments.

use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a response file contributed no arguments.
#[derive(Debug, Error)]
pub enum ResponseFileError {
    #[error("Could not load response file '{path}': static storage cannot hold file content")]
    StaticStorage { path: PathBuf },

    #[error("Could not load response file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not load response file '{path}': file is empty")]
    Empty { path: PathBuf },

    #[error("Could not load response file '{path}': nesting depth {depth} reached")]
    NestingTooDeep { path: PathBuf, depth: usize },
}

impl ResponseFileError {
    /// The path from the `@path` argument.
    pub fn path(&self) -> &Path {
        match self {
            ResponseFileError::StaticStorage { path }
            | ResponseFileError::Read { path, .. }
            | ResponseFileError::Empty { path }
            | ResponseFileError::NestingTooDeep { path, .. } => path,
        }
    }
}

/// Reads a whole file as text, or fails.
pub trait FileSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FileSource for FsSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<F> FileSource for F
where
    F: Fn(&Path) -> io::Result<String>,
{
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self(path)
    }
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Find the token starting at or after `pos`.
///
/// Returns the token's byte range and the position to resume scanning from,
/// which is one past the byte that ended the token.
pub(crate) fn next_token(text: &str, pos: usize) -> Option<(Range<usize>, usize)> {
    let bytes = text.as_bytes();
    let start = pos + bytes.get(pos..)?.iter().position(|&b| !is_space(b))?;

    let (start, end) = match bytes[start] {
        quote @ (b'"' | b'\'') => {
            let inner = start + 1;
            let end = bytes[inner..]
                .iter()
                .position(|&b| b == quote)
                .map_or(bytes.len(), |i| inner + i);
            (inner, end)
        }
        _ => {
            let end = bytes[start..]
                .iter()
                .position(|&b| is_space(b))
                .map_or(bytes.len(), |i| start + i);
            (start, end)
        }
    };

    Some((start..end, end + 1))
}

/// Iterator over the tokens of response file content.
#[derive(Debug, Clone)]
pub struct ResponseFileTokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> ResponseFileTokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for ResponseFileTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (range, next) = next_token(self.text, self.pos)?;
        self.pos = next;
        self.text.get(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        ResponseFileTokens::new(text).collect()
    }

    #[test]
    fn splits_on_ascii_whitespace() {
        assert_eq!(
            tokens("foo\tbar\r\nbaz  qux\n"),
            vec!["foo", "bar", "baz", "qux"]
        );
    }

    #[test]
    fn blank_content_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \t\r\n ").is_empty());
    }

    #[test]
    fn quoted_tokens_keep_whitespace() {
        assert_eq!(
            tokens(r#"foo --flag --param=1 "two words""#),
            vec!["foo", "--flag", "--param=1", "two words"]
        );
        assert_eq!(tokens("'a b' \"c\td\""), vec!["a b", "c\td"]);
    }

    #[test]
    fn quote_matches_only_itself() {
        assert_eq!(tokens(r#"'say "hi"' x"#), vec![r#"say "hi""#, "x"]);
        assert_eq!(tokens(r#""it's" y"#), vec!["it's", "y"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(tokens("a \"b c\nd"), vec!["a", "b c\nd"]);
        assert_eq!(tokens("'"), vec![""]);
    }

    #[test]
    fn closing_quote_ends_token_even_without_whitespace() {
        assert_eq!(tokens(r#""ab"cd"#), vec!["ab", "cd"]);
    }

    #[test]
    fn quotes_inside_unquoted_token_are_literal() {
        assert_eq!(tokens(r#"ab"cd ef""#), vec![r#"ab"cd"#, r#"ef""#]);
    }

    #[test]
    fn empty_quotes_yield_empty_token() {
        assert_eq!(tokens(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        assert_eq!(tokens("héllo \"wörld x\""), vec!["héllo", "wörld x"]);
    }

    #[test]
    fn next_token_reports_resume_position() {
        let text = "ab cd";
        assert_eq!(next_token(text, 0), Some((0..2, 3)));
        assert_eq!(next_token(text, 3), Some((3..5, 6)));
        assert_eq!(next_token(text, 6), None);
    }

    #[test]
    fn error_message_names_the_file() {
        let err = ResponseFileError::Empty {
            path: PathBuf::from("args.rsp"),
        };
        assert_eq!(
            err.to_string(),
            "Could not load response file 'args.rsp': file is empty"
        );
        assert_eq!(err.path(), Path::new("args.rsp"));
    }
}
