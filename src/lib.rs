//! Command-line argument classification with response file expansion.
//!
//! Every argument after the program name becomes one of:
//!
//! - a positional argument (`file.txt`),
//! - a flag (`-v`, `--verbose`; any number of leading dashes),
//! - a parameter (`--level=3`, split at the first `=`),
//! - a response file reference (`@args.rsp`), whose whitespace-separated,
//!   optionally quoted tokens are classified in its place.
//!
//! ```
//! use argsift::args::Session;
//!
//! let mut session = Session::new();
//! session.parse(["prog", "in.txt", "--verbose", "--level=3"]);
//!
//! assert_eq!(session.program_name(), Some("prog"));
//! assert_eq!(session.positional(0), Some("in.txt"));
//! assert!(session.has_flag("verbose"));
//! assert_eq!(session.param("level"), Some("3"));
//! ```

pub mod args;
pub mod config;
pub mod global;
pub mod logging;
