// Tue Jan 13 2026 - Alex

use serde::Serialize;
use serde_json::{to_string, to_string_pretty};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub struct JsonSerializer {
    pretty_print: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, JsonError> {
        let text = if self.pretty_print {
            to_string_pretty(value)?
        } else {
            to_string(value)?
        };
        Ok(text)
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}
