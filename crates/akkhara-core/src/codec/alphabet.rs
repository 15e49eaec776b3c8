use std::collections::BTreeSet;

use super::ScriptCodec;
use crate::hub::{Case, HubSeq, HubToken};
use crate::script::ScriptTag;
use crate::table::{AlphabetTable, Glyph};

/// Letter-per-symbol scripts. In cased scripts matching ignores case and
/// the case of each matched letter is recorded on its hub token.
pub struct AlphabetCodec {
    table: AlphabetTable,
}

impl AlphabetCodec {
    pub(crate) fn new(table: AlphabetTable) -> Self {
        Self { table }
    }

    fn match_at(&self, chars: &[char]) -> Option<(usize, Glyph)> {
        if self.table.cased {
            self.table.trie.longest_match_by(chars, fold_lower)
        } else {
            self.table.trie.longest_match(chars)
        }
    }

    /// Match at the start of `chars` and work out the case of the match.
    /// A mixed-case multi-char match ("kH") is retried one char at a time.
    fn cased_match(&self, chars: &[char]) -> Option<(usize, Glyph, Case)> {
        let (len, glyph) = self.match_at(chars)?;
        if !self.table.cased {
            return Some((len, glyph, Case::Lower));
        }
        if let Some(case) = case_of(&chars[..len]) {
            return Some((len, glyph, case));
        }
        let (len, glyph) = self.match_at(&chars[..1])?;
        Some((len, glyph, case_of(&chars[..len]).unwrap_or_default()))
    }
}

fn fold_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Case of a matched letter, or `None` when it mixes cases in a way no
/// single flag can describe.
fn case_of(chars: &[char]) -> Option<Case> {
    let upper: Vec<bool> = chars
        .iter()
        .filter(|c| c.is_uppercase() || c.is_lowercase())
        .map(|c| c.is_uppercase())
        .collect();
    match upper.as_slice() {
        flags if flags.iter().all(|u| !u) => Some(Case::Lower),
        flags if flags.iter().all(|u| *u) => Some(Case::Upper),
        [true, rest @ ..] if rest.iter().all(|u| !u) => Some(Case::Title),
        _ => None,
    }
}

fn apply_case(form: &str, case: Case) -> String {
    match case {
        Case::Lower => form.to_string(),
        Case::Upper => form.to_uppercase(),
        Case::Title => {
            let mut chars = form.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

impl ScriptCodec for AlphabetCodec {
    fn script(&self) -> ScriptTag {
        self.table.script
    }

    fn decode(&self, text: &str) -> HubSeq {
        let chars: Vec<char> = text.chars().collect();
        let mut out = HubSeq::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            match self.cased_match(&chars[i..]) {
                Some((len, Glyph::Letter(symbol), case)) => {
                    out.push(HubToken::symbol(symbol).with_case(case));
                    i += len;
                }
                Some((len, Glyph::Punct(ch), _)) => {
                    out.push_literal(ch);
                    i += len;
                }
                None if self.table.punctuation.contains_key(&chars[i]) => {
                    out.push_verbatim(chars[i]);
                    i += 1;
                }
                // Alphabet tables only hold letters and punctuation.
                _ => {
                    out.push_literal(chars[i]);
                    i += 1;
                }
            }
        }
        out
    }

    fn encode(&self, hub: &HubSeq) -> String {
        let t = &self.table;
        let mut out = String::with_capacity(hub.len() * 2);
        for token in hub.iter() {
            if let Some(symbol) = token.unit.as_symbol() {
                let form = t.letters.get(symbol).unwrap_or_default();
                if t.cased && token.case != Case::Lower {
                    out.push_str(&apply_case(form, token.case));
                } else {
                    out.push_str(form);
                }
            } else if let Some(ch) = token.unit.as_literal() {
                match t.punctuation.get(&ch).filter(|_| !token.unit.is_verbatim()) {
                    Some(native) => out.push_str(native),
                    None => out.push(ch),
                }
            }
        }
        out
    }

    fn repertoire(&self) -> &BTreeSet<char> {
        &self.table.repertoire
    }
}
