//! In-memory parameter store adapter.
//!
//! Implements [`ParamPort`] over a string map.  The web UI keeps its
//! parameters as a flat JSON object of strings, e.g.
//!
//! ```json
//! { "minBrightness": "0", "maxBrightness": "100", "autoOffTimer": "300" }
//! ```
//!
//! which [`MemoryParams::from_json`] loads directly.  Persistence of that
//! blob is the store's business, not this crate's.

use std::collections::BTreeMap;

use log::{info, warn};

use crate::app::ports::ParamPort;

#[derive(Debug, Clone, Default)]
pub struct MemoryParams {
    values: BTreeMap<String, String>,
}

impl MemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a flat JSON object of string values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let values: BTreeMap<String, String> = serde_json::from_str(json)?;
        info!("params: loaded {} value(s)", values.len());
        Ok(Self { values })
    }

    /// Load, falling back to an empty store on malformed JSON.
    pub fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("params: ignoring malformed blob ({})", e);
            Self::default()
        })
    }

    pub fn set(&mut self, id: &str, value: &str) {
        self.values.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) {
        self.values.remove(id);
    }
}

impl ParamPort for MemoryParams {
    fn param(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }
}
