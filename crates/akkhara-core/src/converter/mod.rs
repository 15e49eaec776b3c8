//! Script-to-script conversion through the hub.
//!
//! Every conversion is decode(source) followed by encode(target). The
//! [`Converter`] owns the [`TableCache`], so independent converters (tests,
//! overridden tables) never share state.

mod cache;
mod detect;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{debug_span, trace};

use crate::codec::ScriptCodec;
use crate::hub::HubSeq;
use crate::script::ScriptTag;
use crate::settings::settings;
use crate::table::TableError;

pub use cache::TableCache;
pub use detect::detect_script;
use detect::script_runs;

pub struct Converter {
    cache: TableCache,
    wildcards: Vec<char>,
}

impl Converter {
    /// Converter with the embedded tables and the configured wildcards.
    pub fn new() -> Self {
        Self::with_cache(TableCache::new())
    }

    pub fn with_cache(cache: TableCache) -> Self {
        Self {
            cache,
            wildcards: settings().wildcards().to_vec(),
        }
    }

    pub fn with_wildcards(mut self, wildcards: impl IntoIterator<Item = char>) -> Self {
        self.wildcards = wildcards.into_iter().collect();
        self
    }

    pub fn wildcards(&self) -> &[char] {
        &self.wildcards
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    pub fn codec(&self, script: ScriptTag) -> Result<Arc<dyn ScriptCodec>, TableError> {
        self.cache.get(script)
    }

    pub fn decode(&self, text: &str, source: ScriptTag) -> Result<HubSeq, TableError> {
        Ok(self.codec(source)?.decode(text))
    }

    pub fn encode(&self, hub: &HubSeq, target: ScriptTag) -> Result<String, TableError> {
        Ok(self.codec(target)?.encode(hub))
    }

    /// Convert `text` from `source` to `target`.
    ///
    /// Same-script conversion returns the input untouched without loading
    /// any table. Otherwise the only possible failure is a table that
    /// cannot be built.
    pub fn convert(
        &self,
        text: &str,
        source: ScriptTag,
        target: ScriptTag,
    ) -> Result<String, TableError> {
        if source == target {
            return Ok(text.to_string());
        }
        let decoder = self.codec(source)?;
        let encoder = self.codec(target)?;
        let hub = decoder.decode(text);
        let out = encoder.encode(&hub);
        trace!(%source, %target, units = hub.len(), "convert");
        Ok(out)
    }

    /// Convert a search pattern, keeping wildcard glyphs verbatim and in
    /// place. Each stretch between wildcards is converted on its own.
    pub fn convert_preserving_wildcards(
        &self,
        pattern: &str,
        source: ScriptTag,
        target: ScriptTag,
    ) -> Result<String, TableError> {
        if source == target {
            return Ok(pattern.to_string());
        }
        let _span = debug_span!("convert_pattern", %source, %target).entered();
        let decoder = self.codec(source)?;
        let encoder = self.codec(target)?;

        let mut out = String::with_capacity(pattern.len() * 2);
        let mut rest = pattern;
        while let Some(pos) = rest.find(|c: char| self.wildcards.contains(&c)) {
            let (segment, tail) = rest.split_at(pos);
            out.push_str(&encoder.encode(&decoder.decode(segment)));
            let mut tail_chars = tail.chars();
            if let Some(wildcard) = tail_chars.next() {
                out.push(wildcard);
            }
            rest = tail_chars.as_str();
        }
        out.push_str(&encoder.encode(&decoder.decode(rest)));
        Ok(out)
    }

    /// Decode text whose script is unknown or mixed. Each script run is
    /// decoded with its own codec; text with no script at all becomes
    /// literals. Wildcards become verbatim literals, so no target script
    /// re-punctuates them.
    pub fn decode_any(&self, text: &str) -> Result<HubSeq, TableError> {
        let mut hub = HubSeq::with_capacity(text.len());
        for (script, run) in script_runs(text) {
            let codec = match script {
                Some(script) => Some(self.codec(script)?),
                None => None,
            };
            let mut rest = run;
            loop {
                let pos = rest.find(|c: char| self.wildcards.contains(&c));
                let (segment, tail) = rest.split_at(pos.unwrap_or(rest.len()));
                match &codec {
                    Some(codec) => hub.append(codec.decode(segment)),
                    None => segment.chars().for_each(|c| hub.push_literal(c)),
                }
                let mut tail_chars = tail.chars();
                match tail_chars.next() {
                    Some(wildcard) => hub.push_verbatim(wildcard),
                    None => break,
                }
                rest = tail_chars.as_str();
            }
        }
        Ok(hub)
    }

    pub fn convert_any(&self, text: &str, target: ScriptTag) -> Result<String, TableError> {
        let hub = self.decode_any(text)?;
        let out = self.encode(&hub, target)?;
        trace!(%target, units = hub.len(), "convert_any");
        Ok(out)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
