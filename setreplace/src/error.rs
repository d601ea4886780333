//! Common error type.

use crate::rule::Error as RuleError;
use crate::store::Error as StoreError;

/// Common error type.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Rule(RuleError),
    Store(StoreError),
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Self::Rule(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
