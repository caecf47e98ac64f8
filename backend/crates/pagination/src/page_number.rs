//! One-based page numbers.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageNumberError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    Zero,
    /// The raw value was not an unsigned integer.
    #[error("page number must be a positive integer, got {raw:?}")]
    NotANumber {
        /// Raw text that failed to parse.
        raw: String,
    },
}

/// A one-based page number.
///
/// ## Invariants
/// - Always `>= 1`.
///
/// # Examples
/// ```
/// use pagination::PageNumber;
///
/// let page = PageNumber::new(3).unwrap();
/// assert_eq!(page.get(), 3);
/// assert!(PageNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PageNumberError::Zero`] when `value` is zero.
    pub fn new(value: u32) -> Result<Self, PageNumberError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(PageNumberError::Zero)
    }

    /// Raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PageNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl FromStr for PageNumber {
    type Err = PageNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let value = raw.parse::<u32>().map_err(|_| PageNumberError::NotANumber {
            raw: raw.to_owned(),
        })?;
        Self::new(value)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
