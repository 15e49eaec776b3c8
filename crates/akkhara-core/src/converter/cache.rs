use std::sync::{Arc, OnceLock};

use tracing::{debug, debug_span, warn};

use crate::codec::{build_codec, ScriptCodec};
use crate::script::ScriptTag;
use crate::table::{embedded_source, TableError};

type Slot = OnceLock<Result<Arc<dyn ScriptCodec>, TableError>>;

/// One lazily built codec per script.
///
/// Each slot is initialized at most once, on first use, and keeps either
/// the codec or the error that prevented building it. A failed table only
/// affects its own script.
pub struct TableCache {
    slots: [Slot; ScriptTag::COUNT],
    sources: [Option<String>; ScriptTag::COUNT],
}

impl TableCache {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| OnceLock::new()),
            sources: std::array::from_fn(|_| None),
        }
    }

    /// Replace the embedded table source for `script`.
    pub fn with_source(mut self, script: ScriptTag, source: impl Into<String>) -> Self {
        self.sources[script.index()] = Some(source.into());
        self
    }

    pub fn get(&self, script: ScriptTag) -> Result<Arc<dyn ScriptCodec>, TableError> {
        self.slots[script.index()]
            .get_or_init(|| self.build(script))
            .clone()
    }

    pub fn is_loaded(&self, script: ScriptTag) -> bool {
        self.slots[script.index()].get().is_some()
    }

    /// Build every table now. Returns the scripts that failed.
    pub fn preload_all(&self) -> Vec<(ScriptTag, TableError)> {
        ScriptTag::ALL
            .into_iter()
            .filter_map(|script| self.get(script).err().map(|e| (script, e)))
            .collect()
    }

    fn build(&self, script: ScriptTag) -> Result<Arc<dyn ScriptCodec>, TableError> {
        let _span = debug_span!("build_table", %script).entered();
        let overridden = self.sources[script.index()].as_deref();
        let source = match overridden.or_else(|| embedded_source(script)) {
            Some(src) => src,
            None if script == ScriptTag::Hub => "",
            None => return Err(TableError::NoSource { script }),
        };
        let result = build_codec(script, source);
        match &result {
            Ok(codec) => debug!(
                overridden = overridden.is_some(),
                repertoire = codec.repertoire().len(),
                "table built"
            ),
            Err(e) => warn!("table for {script} failed: {e}"),
        }
        result
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}
