//! Script codecs: native text ⇄ hub sequence.
//!
//! Every script is served by one value implementing [`ScriptCodec`]. Two
//! families cover the native scripts: abugidas (inherent-vowel scripts,
//! with conjunct and vowel-sign rules) and alphabets (Latin, Cyrillic).
//! The hub itself gets a codec too so it can be addressed like any script.

mod abugida;
mod alphabet;
mod hub_text;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::hub::HubSeq;
use crate::script::ScriptTag;
use crate::table::{parse_table, ScriptTable, TableError};

pub use abugida::AbugidaCodec;
pub use alphabet::AlphabetCodec;
pub use hub_text::HubCodec;

pub trait ScriptCodec: Send + Sync {
    fn script(&self) -> ScriptTag;

    /// Native text to hub. Never fails; unknown chars become literals.
    fn decode(&self, text: &str) -> HubSeq;

    /// Hub to native text. Literals are re-emitted unchanged apart from the
    /// script's punctuation forms.
    fn encode(&self, hub: &HubSeq) -> String;

    /// Every char that appears in one of the script's native forms.
    fn repertoire(&self) -> &BTreeSet<char>;
}

/// Build the codec for `script` from table source text.
pub fn build_codec(script: ScriptTag, source: &str) -> Result<Arc<dyn ScriptCodec>, TableError> {
    if script == ScriptTag::Hub {
        return Ok(Arc::new(HubCodec::new()));
    }
    let codec: Arc<dyn ScriptCodec> = match parse_table(script, source)? {
        ScriptTable::Abugida(table) => Arc::new(AbugidaCodec::new(table)),
        ScriptTable::Alphabet(table) => Arc::new(AlphabetCodec::new(table)),
    };
    Ok(codec)
}
