//! Caller-owned memo of compiled formats, keyed by format string.

use std::{collections::HashMap, sync::Arc};

use crate::{compiled::CompiledFormat, errors::FormatError};

/// Maps format strings to their compiled form.
///
/// The cache is a plain value: share it between threads by wrapping it in the
/// lock of your choice. Compiled formats are handed out as [Arc]s and can be
/// used after the cache is dropped or cleared.
#[derive(Debug, Default)]
pub struct FormatCache {
    formats: HashMap<String, Arc<CompiledFormat>>,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled form of `format`, compiling it on first use.
    ///
    /// Formats that fail to compile are not cached.
    pub fn get_or_compile(&mut self, format: &str) -> Result<Arc<CompiledFormat>, FormatError> {
        if let Some(compiled) = self.formats.get(format) {
            return Ok(Arc::clone(compiled));
        }

        tracing::debug!(format = format, "format cache miss");
        let compiled = Arc::new(CompiledFormat::compile(format)?);
        self.formats.insert(format.to_string(), Arc::clone(&compiled));

        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn clear(&mut self) {
        self.formats.clear();
    }
}
