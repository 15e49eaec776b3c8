//! Inherent-vowel scripts.
//!
//! Decoding turns each consonant letter into `consonant + a` unless a
//! virama, subjoined consonant or vowel sign says otherwise. Encoding
//! reverses that: `a` after a consonant is dropped, other vowels become
//! signs, consonant clusters get a joiner (or subjoined letters), and a
//! vowelless consonant before anything else gets the final virama.

use std::collections::BTreeSet;

use super::ScriptCodec;
use crate::hub::HubSeq;
use crate::script::ScriptTag;
use crate::symbol::Symbol;
use crate::table::{AbugidaTable, Glyph};

pub struct AbugidaCodec {
    table: AbugidaTable,
}

impl AbugidaCodec {
    pub(crate) fn new(table: AbugidaTable) -> Self {
        Self { table }
    }

    fn consonant_form(&self, consonant: Symbol, subjoin: bool) -> &str {
        let t = &self.table;
        let forms = match (&t.subjoined, subjoin) {
            (Some(sub), true) => sub,
            _ => &t.consonants,
        };
        forms.get(consonant).unwrap_or_default()
    }

    fn sign_form(&self, consonant: Symbol, vowel: Symbol) -> &str {
        let t = &self.table;
        t.contextual
            .as_ref()
            .and_then(|ctx| ctx.sign(consonant, vowel))
            .or_else(|| t.signs.get(vowel))
            .unwrap_or_default()
    }

    fn push_literal(&self, out: &mut String, ch: char, verbatim: bool) {
        match self.table.punctuation.get(&ch).filter(|_| !verbatim) {
            Some(native) => out.push_str(native),
            None => out.push(ch),
        }
    }
}

/// Decoding state: the last consonant may still be waiting for its vowel,
/// and a pre-base sign may be waiting for its consonant.
struct Assembler<'a> {
    out: HubSeq,
    open: bool,
    held: Option<(Symbol, &'a [char])>,
}

impl<'a> Assembler<'a> {
    fn new(capacity: usize) -> Self {
        Self {
            out: HubSeq::with_capacity(capacity),
            open: false,
            held: None,
        }
    }

    /// Give a waiting consonant its inherent vowel.
    fn close(&mut self) {
        if self.open {
            self.out.push_symbol(Symbol::A);
            self.open = false;
        }
    }

    /// A pre-base sign that never met its consonant is passed through.
    fn flush_held(&mut self) {
        if let Some((_, raw)) = self.held.take() {
            for &ch in raw {
                self.out.push_literal(ch);
            }
        }
    }

    /// An ASCII char that is also a punctuation key was typed as itself and
    /// must not come back as the native mark.
    fn verbatim(&mut self, ch: char) {
        self.close();
        self.flush_held();
        self.out.push_verbatim(ch);
    }

    fn literals(&mut self, raw: &[char]) {
        self.close();
        self.flush_held();
        for &ch in raw {
            self.out.push_literal(ch);
        }
    }

    fn consonant(&mut self, consonant: Symbol) {
        self.out.push_symbol(consonant);
        match self.held.take() {
            Some((vowel, _)) => self.out.push_symbol(vowel),
            None => self.open = true,
        }
    }

    fn glyph(&mut self, glyph: Glyph, raw: &'a [char]) {
        match glyph {
            Glyph::Consonant(c) => {
                self.close();
                self.consonant(c);
            }
            Glyph::Subjoined(c) if self.open => {
                self.open = false;
                self.consonant(c);
            }
            Glyph::Sign(v) if self.open => {
                self.out.push_symbol(v);
                self.open = false;
            }
            Glyph::Virama if self.open => self.open = false,
            Glyph::Subjoined(_) | Glyph::Sign(_) | Glyph::Virama => self.literals(raw),
            Glyph::PrebaseSign(v) => {
                self.close();
                self.flush_held();
                self.held = Some((v, raw));
            }
            Glyph::Vowel(s) | Glyph::Letter(s) => {
                self.close();
                self.flush_held();
                self.out.push_symbol(s);
            }
            Glyph::Niggahita => {
                self.close();
                self.flush_held();
                self.out.push_symbol(Symbol::Niggahita);
            }
            Glyph::Punct(ch) => {
                self.close();
                self.flush_held();
                self.out.push_literal(ch);
            }
        }
    }

    fn finish(mut self) -> HubSeq {
        self.close();
        self.flush_held();
        self.out
    }
}

impl ScriptCodec for AbugidaCodec {
    fn script(&self) -> ScriptTag {
        self.table.script
    }

    fn decode(&self, text: &str) -> HubSeq {
        let chars: Vec<char> = text.chars().collect();
        let mut asm = Assembler::new(chars.len());
        let mut i = 0;
        while i < chars.len() {
            match self.table.trie.longest_match(&chars[i..]) {
                Some((len, glyph)) => {
                    asm.glyph(glyph, &chars[i..i + len]);
                    i += len;
                }
                None if self.table.punctuation.contains_key(&chars[i]) => {
                    asm.verbatim(chars[i]);
                    i += 1;
                }
                None => {
                    asm.literals(&chars[i..i + 1]);
                    i += 1;
                }
            }
        }
        asm.finish()
    }

    fn encode(&self, hub: &HubSeq) -> String {
        let t = &self.table;
        let tokens = hub.tokens();
        let mut out = String::with_capacity(tokens.len() * 3);
        // Previous consonant was written without a vowel inside a cluster.
        let mut in_cluster = false;
        let mut i = 0;

        while i < tokens.len() {
            let Some(symbol) = tokens[i].unit.as_symbol() else {
                let unit = tokens[i].unit;
                if let Some(ch) = unit.as_literal() {
                    self.push_literal(&mut out, ch, unit.is_verbatim());
                }
                in_cluster = false;
                i += 1;
                continue;
            };

            if !symbol.is_consonant() {
                match symbol {
                    Symbol::Niggahita => out.push_str(&t.niggahita),
                    vowel => out.push_str(t.vowels.get(vowel).unwrap_or_default()),
                }
                in_cluster = false;
                i += 1;
                continue;
            }

            let form = self.consonant_form(symbol, in_cluster);
            let next = tokens.get(i + 1).and_then(|t| t.unit.as_symbol());
            match next {
                Some(Symbol::A) => {
                    out.push_str(form);
                    in_cluster = false;
                    i += 2;
                }
                Some(vowel) if vowel.is_vowel() => {
                    let sign = self.sign_form(symbol, vowel);
                    if t.prebase.contains(&vowel) {
                        out.push_str(sign);
                        out.push_str(form);
                    } else {
                        out.push_str(form);
                        out.push_str(sign);
                    }
                    in_cluster = false;
                    i += 2;
                }
                Some(following) if following.is_consonant() => {
                    out.push_str(form);
                    if let Some(joiner) = &t.joiner {
                        out.push_str(joiner);
                    }
                    in_cluster = true;
                    i += 1;
                }
                _ => {
                    out.push_str(form);
                    out.push_str(&t.final_virama);
                    in_cluster = false;
                    i += 1;
                }
            }
        }
        out
    }

    fn repertoire(&self) -> &BTreeSet<char> {
        &self.table.repertoire
    }
}
