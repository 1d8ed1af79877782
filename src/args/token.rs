//! Text slices into session-owned buffers.
//!
//! Nothing the session stores is a copy of argument text. Positional
//! arguments, flag names and parameters are `(buffer, start, len)` triples
//! pointing into either an element of the raw argument vector or the full
//! content of a loaded response file. Both kinds of buffer live in
//! [`Buffers`] until the session is reset or released.

use std::path::{Path, PathBuf};

/// Which owned buffer a [`Token`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BufferId {
    /// Element of the raw argument vector.
    Arg(usize),
    /// Content of a loaded response file.
    File(usize),
}

/// A byte range inside one of the session's buffers.
///
/// Ranges are always cut at ASCII boundaries (`-`, `=`, quotes, whitespace),
/// so they never split a UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    buffer: BufferId,
    start: usize,
    len: usize,
}

impl Token {
    pub(crate) fn new(buffer: BufferId, start: usize, len: usize) -> Self {
        Self { buffer, start, len }
    }

    /// Drop the first `count` bytes.
    pub(crate) fn skip(self, count: usize) -> Self {
        let count = count.min(self.len);
        Self {
            buffer: self.buffer,
            start: self.start + count,
            len: self.len - count,
        }
    }
}

/// A response file that was read in full.
#[derive(Debug)]
pub(crate) struct ResponseBuffer {
    pub(crate) path: PathBuf,
    pub(crate) text: String,
}

/// Owner of every buffer a session's tokens point into.
#[derive(Debug, Default)]
pub(crate) struct Buffers {
    args: Vec<String>,
    files: Vec<ResponseBuffer>,
}

impl Buffers {
    /// Take ownership of a raw argument and return a token spanning all of it.
    pub(crate) fn push_arg(&mut self, arg: String) -> Token {
        let len = arg.len();
        self.args.push(arg);
        Token::new(BufferId::Arg(self.args.len() - 1), 0, len)
    }

    /// Take ownership of a response file's content and return its index.
    pub(crate) fn push_file(&mut self, path: PathBuf, text: String) -> usize {
        self.files.push(ResponseBuffer { path, text });
        self.files.len() - 1
    }

    pub(crate) fn file_text(&self, index: usize) -> &str {
        self.files.get(index).map_or("", |f| f.text.as_str())
    }

    pub(crate) fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    pub(crate) fn resolve(&self, token: Token) -> &str {
        let buffer = match token.buffer {
            BufferId::Arg(i) => self.args.get(i).map(String::as_str),
            BufferId::File(i) => self.files.get(i).map(|f| f.text.as_str()),
        };
        buffer
            .and_then(|text| text.get(token.start..token.start + token.len))
            .unwrap_or("")
    }

    pub(crate) fn clear(&mut self) {
        self.args.clear();
        self.files.clear();
    }

    /// Drop all buffers and give their memory back.
    pub(crate) fn release(&mut self) {
        *self = Self::default();
    }
}
