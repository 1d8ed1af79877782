//! Argument ingestion.
//!
//! ```text
//! raw args → Classify → { positional | flag | param | @file → Tokenize → Classify … }
//! ```
//!
//! A [`Session`] owns everything it parses. Containers are either
//! fixed-capacity or growable, chosen once through [`StorageMode`].

mod classifier;
mod response_file;
mod session;
mod store;
mod token;

pub use classifier::{classify, ClassifiedArg};
pub use response_file::{FileSource, FsSource, ResponseFileError, ResponseFileTokens};
pub use session::{Session, SessionBuilder, DEFAULT_MAX_RESPONSE_DEPTH};
pub use store::{
    ArgStore, FixedStore, GrowableStore, MemoryCapabilities, StorageMode, Store,
    DEFAULT_INITIAL_CAPACITY, MAX_FLAGS, MAX_PARAMS, MAX_POSITIONALS,
};
