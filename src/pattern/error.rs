// Tue Jan 13 2026 - Alex

use crate::pattern::EncodingFamily;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Value {value} does not fit the {family} encoding")]
    OutOfRange { value: u64, family: EncodingFamily },
}
