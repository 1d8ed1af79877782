//! Parse session — owns the parsed state and answers queries about it.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::args::classifier::{kind_of, Kind};
use crate::args::response_file::{next_token, FileSource, FsSource, ResponseFileError};
use crate::args::store::{
    ArgStore, StorageMode, Store, DEFAULT_INITIAL_CAPACITY, MAX_FLAGS, MAX_PARAMS,
    MAX_POSITIONALS,
};
use crate::args::token::{BufferId, Buffers, Token};
use crate::config::Config;

/// Default limit on nested `@file` expansion.
pub const DEFAULT_MAX_RESPONSE_DEPTH: usize = 32;

/// A parameter: the dash-stripped `name=value` text and the name's length.
#[derive(Debug, Clone, Copy)]
struct ParamEntry {
    text: Token,
    name_len: usize,
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    storage: StorageMode,
    initial_capacity: usize,
    response_files: bool,
    max_response_depth: usize,
    source: Box<dyn FileSource + Send + Sync>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            storage: StorageMode::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            response_files: true,
            max_response_depth: DEFAULT_MAX_RESPONSE_DEPTH,
            source: Box::new(FsSource),
        }
    }

    pub fn storage(mut self, storage: StorageMode) -> Self {
        self.storage = storage;
        self
    }

    /// Starting capacity of each container in dynamic mode.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// When disabled, `@path` arguments are skipped without a diagnostic.
    pub fn response_files(mut self, enabled: bool) -> Self {
        self.response_files = enabled;
        self
    }

    pub fn max_response_depth(mut self, depth: usize) -> Self {
        self.max_response_depth = depth;
        self
    }

    /// Where response file content is read from. Defaults to [`FsSource`].
    pub fn file_source(mut self, source: impl FileSource + Send + Sync + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Apply every setting from a loaded [`Config`].
    pub fn config(self, config: &Config) -> Self {
        self.storage(config.storage)
            .initial_capacity(config.initial_capacity)
            .response_files(config.response_files)
            .max_response_depth(config.max_response_depth)
    }

    pub fn build(self) -> Session {
        Session {
            positionals: Store::new(self.storage, self.initial_capacity),
            flags: Store::new(self.storage, self.initial_capacity),
            params: Store::new(self.storage, self.initial_capacity),
            storage: self.storage,
            initial_capacity: self.initial_capacity,
            response_files: self.response_files,
            max_response_depth: self.max_response_depth,
            source: self.source,
            buffers: Buffers::default(),
            program_name: None,
            diagnostics: Vec::new(),
        }
    }
}

/// Parsed command line.
///
/// Each [`parse`](Session::parse) call replaces everything from the previous
/// one. All returned text borrows from buffers the session owns: the
/// argument strings it was given and the content of every response file it
/// loaded.
pub struct Session {
    storage: StorageMode,
    initial_capacity: usize,
    response_files: bool,
    max_response_depth: usize,
    source: Box<dyn FileSource + Send + Sync>,
    buffers: Buffers,
    program_name: Option<Token>,
    positionals: Store<Token, MAX_POSITIONALS>,
    flags: Store<Token, MAX_FLAGS>,
    params: Store<ParamEntry, MAX_PARAMS>,
    diagnostics: Vec<ResponseFileError>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Static storage, response files read from disk.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_storage(storage: StorageMode) -> Self {
        Self::builder().storage(storage).build()
    }

    pub fn storage(&self) -> StorageMode {
        self.storage
    }

    /// Parse a raw argument vector. The first element is the program name.
    pub fn parse<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reset();

        let mut args = args.into_iter();
        let Some(program) = args.next() else {
            return;
        };
        self.program_name = Some(self.buffers.push_arg(program.into()));

        for arg in args {
            let token = self.buffers.push_arg(arg.into());
            self.add_arg(token, 0);
        }

        tracing::debug!(
            positionals = self.positionals.len(),
            flags = self.flags.len(),
            params = self.params.len(),
            response_files = self.buffers.file_paths().count(),
            "Parsed command line"
        );
    }

    fn reset(&mut self) {
        self.buffers.clear();
        self.program_name = None;
        self.positionals.clear();
        self.flags.clear();
        self.params.clear();
        self.diagnostics.clear();
    }

    fn add_arg(&mut self, token: Token, depth: usize) {
        let text = self.buffers.resolve(token);
        tracing::trace!(arg = text, depth, "Classifying argument");

        let (stored, container) = match kind_of(text) {
            Kind::ResponseFile => {
                let path = PathBuf::from(&text[1..]);
                self.expand_response_file(path, depth);
                return;
            }
            Kind::Positional => (self.positionals.push(token), "positionals"),
            Kind::Flag { dashes } => (self.flags.push(token.skip(dashes)), "flags"),
            Kind::Param { dashes, name_len } => {
                let entry = ParamEntry {
                    text: token.skip(dashes),
                    name_len,
                };
                (self.params.push(entry), "params")
            }
        };

        if !stored {
            tracing::trace!(arg = text, container, depth, "Container full, argument dropped");
        }
    }

    fn expand_response_file(&mut self, path: PathBuf, depth: usize) {
        if !self.response_files {
            tracing::trace!(path = %path.display(), "Response files disabled, skipping");
            return;
        }

        let index = match self.load_response_file(path, depth) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("{}", e);
                self.diagnostics.push(e);
                return;
            }
        };

        let mut pos = 0;
        while let Some((range, next)) = next_token(self.buffers.file_text(index), pos) {
            pos = next;
            let token = Token::new(BufferId::File(index), range.start, range.len());
            self.add_arg(token, depth + 1);
        }
    }

    fn load_response_file(
        &mut self,
        path: PathBuf,
        depth: usize,
    ) -> Result<usize, ResponseFileError> {
        if !self.storage.supports_response_files() {
            return Err(ResponseFileError::StaticStorage { path });
        }
        if depth >= self.max_response_depth {
            return Err(ResponseFileError::NestingTooDeep { path, depth });
        }

        let text = match self.source.read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(ResponseFileError::Read { path, source }),
        };
        if text.is_empty() {
            return Err(ResponseFileError::Empty { path });
        }

        tracing::debug!(path = %path.display(), bytes = text.len(), depth, "Loaded response file");
        Ok(self.buffers.push_file(path, text))
    }

    /// First raw argument of the last parse, if there was one.
    pub fn program_name(&self) -> Option<&str> {
        self.program_name.map(|t| self.buffers.resolve(t))
    }

    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals
            .get(index)
            .map(|&t| self.buffers.resolve(t))
    }

    pub fn positionals(&self) -> impl Iterator<Item = &str> {
        self.positionals.iter().map(|&t| self.buffers.resolve(t))
    }

    /// Exact, case-sensitive match against flag names (dashes stripped).
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags().any(|flag| flag == name)
    }

    /// Flag names in the order they were seen, duplicates included.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|&t| self.buffers.resolve(t))
    }

    /// Value of the first parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value)
    }

    /// `(name, value)` pairs in the order they were seen.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|entry| {
            let text = self.buffers.resolve(entry.text);
            let name = text.get(..entry.name_len).unwrap_or("");
            let value = text.get(entry.name_len + 1..).unwrap_or("");
            (name, value)
        })
    }

    /// Response files loaded by the last parse, in load order.
    pub fn response_files(&self) -> impl Iterator<Item = &Path> {
        self.buffers.file_paths()
    }

    /// Response files that were skipped during the last parse.
    pub fn diagnostics(&self) -> &[ResponseFileError] {
        &self.diagnostics
    }

    /// Drop all parsed state and give back heap memory, including response
    /// file buffers. The session can be reused afterwards.
    ///
    /// Static storage owns no heap memory, so this is a no-op there and the
    /// parsed results stay queryable.
    pub fn release(&mut self) {
        if self.storage == StorageMode::Static {
            return;
        }
        self.reset();
        self.buffers.release();
        self.diagnostics = Vec::new();
        self.positionals = Store::new(self.storage, self.initial_capacity);
        self.flags = Store::new(self.storage, self.initial_capacity);
        self.params = Store::new(self.storage, self.initial_capacity);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("storage", &self.storage)
            .field("program_name", &self.program_name())
            .field("positionals", &self.positionals().collect::<Vec<_>>())
            .field("flags", &self.flags().collect::<Vec<_>>())
            .field("params", &self.params().collect::<Vec<_>>())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}
