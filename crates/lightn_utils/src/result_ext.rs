use anyhow::anyhow;
use std::{error::Error, fmt::Display};

use crate::AnyResult;

/// Turns errors and `None`s into [`anyhow::Error`]s, describing what was being done when they
/// happened.
///
/// ## Example
/// ```
/// use lightn_utils::AnyhowResultExt;
///
/// let parsed = "12x".parse::<u32>().otherwise("invalid slot count");
/// assert_eq!(parsed.unwrap_err().to_string(), "invalid slot count");
/// ```
pub trait AnyhowResultExt<T>: Sized {
    /// Like [`Self::otherwise`], except the description is only built on failure.
    fn otherwise_with<D: Display>(self, f: impl FnOnce() -> D) -> AnyResult<T>;

    fn otherwise(self, s: impl Display) -> AnyResult<T> {
        self.otherwise_with(|| s)
    }
}

impl<T, E: Error + Send + Sync + 'static> AnyhowResultExt<T> for Result<T, E> {
    fn otherwise_with<D: Display>(self, f: impl FnOnce() -> D) -> AnyResult<T> {
        self.map_err(|e| anyhow::Error::from(e).context(f().to_string()))
    }
}

impl<T> AnyhowResultExt<T> for Option<T> {
    fn otherwise_with<D: Display>(self, f: impl FnOnce() -> D) -> AnyResult<T> {
        self.ok_or_else(|| anyhow!("{}", f()))
    }
}
