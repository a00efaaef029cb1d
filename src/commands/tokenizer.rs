// src/commands/tokenizer.rs

//! Whitespace tokenizer.
//!
//! A command line is split on runs of ASCII whitespace. Quotes, escapes,
//! variables and redirection operators have no meaning: `'a b'` is two
//! tokens, `'a` and `b'`.

use std::ffi::{CStr, CString};
use std::fmt;

use crate::commands::store::CommandLine;
use crate::errors::LaunchError;

/// Owned argument vector for `execvp`; the first token is the program.
///
/// The terminating NULL pointer is added by `execvp` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector {
    args: Vec<CString>,
}

impl ArgumentVector {
    /// Program name, or `None` for a blank command line.
    pub fn program(&self) -> Option<&CStr> {
        self.args.first().map(CString::as_c_str)
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", arg.to_string_lossy())?;
        }
        f.write_str("]")
    }
}

/// Same set as C `isspace` in the "C" locale.
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Split a command line into its argument vector.
///
/// A blank line yields an empty vector; the caller decides what launching
/// nothing means. The only failure is a token holding a NUL byte, which no
/// C string can carry.
pub fn tokenize(line: &CommandLine) -> Result<ArgumentVector, LaunchError> {
    let args = line
        .as_bytes()
        .split(|&b| is_separator(b))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            CString::new(token).map_err(|_| LaunchError::NulByte { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ArgumentVector { args })
}
