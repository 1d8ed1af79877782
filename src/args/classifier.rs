//! Argument classifier — one raw token → positional, flag, parameter or
//! response file reference.

/// A classified argument, borrowing from the token it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedArg<'a> {
    /// `@path` — expand the named response file in place.
    ResponseFile(&'a str),
    /// Anything not starting with `-` or `@`.
    Positional(&'a str),
    /// `-name` with no `=`. Leading dashes are stripped; the name may be empty.
    Flag(&'a str),
    /// `-name=value`, split at the first `=`.
    Param { name: &'a str, value: &'a str },
}

/// Offsets-only form of [`ClassifiedArg`], used when the session needs to
/// re-slice its own buffers instead of borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    ResponseFile,
    Positional,
    Flag { dashes: usize },
    Param { dashes: usize, name_len: usize },
}

pub(crate) fn kind_of(arg: &str) -> Kind {
    if arg.starts_with('@') {
        return Kind::ResponseFile;
    }
    if !arg.starts_with('-') {
        return Kind::Positional;
    }

    let dashes = arg.len() - arg.trim_start_matches('-').len();
    match arg[dashes..].find('=') {
        Some(name_len) => Kind::Param { dashes, name_len },
        None => Kind::Flag { dashes },
    }
}

/// Classify a single raw token.
///
/// `-x`, `--x` and `-----x` are all the flag `x`; `--p=1` is the parameter
/// `p` with value `1`. A lone `-` or `--` is a flag with an empty name.
pub fn classify(arg: &str) -> ClassifiedArg<'_> {
    match kind_of(arg) {
        Kind::ResponseFile => ClassifiedArg::ResponseFile(&arg[1..]),
        Kind::Positional => ClassifiedArg::Positional(arg),
        Kind::Flag { dashes } => ClassifiedArg::Flag(&arg[dashes..]),
        Kind::Param { dashes, name_len } => {
            let rest = &arg[dashes..];
            ClassifiedArg::Param {
                name: &rest[..name_len],
                value: &rest[name_len + 1..],
            }
        }
    }
}
