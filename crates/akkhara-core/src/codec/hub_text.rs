use std::collections::BTreeSet;

use super::ScriptCodec;
use crate::hub::{self, HubSeq, RESERVED};
use crate::script::ScriptTag;

/// The hub addressed as a script: hub text in, hub text out.
pub struct HubCodec {
    repertoire: BTreeSet<char>,
}

impl HubCodec {
    pub fn new() -> Self {
        Self {
            repertoire: RESERVED.filter_map(char::from_u32).collect(),
        }
    }
}

impl Default for HubCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptCodec for HubCodec {
    fn script(&self) -> ScriptTag {
        ScriptTag::Hub
    }

    fn decode(&self, text: &str) -> HubSeq {
        hub::from_text(text)
    }

    fn encode(&self, seq: &HubSeq) -> String {
        hub::to_text(seq)
    }

    fn repertoire(&self) -> &BTreeSet<char> {
        &self.repertoire
    }
}
