//! Per-script mapping tables.
//!
//! Each script ships as an embedded TOML document under `table/data/`.
//! [`parse_table`] turns one into a validated [`ScriptTable`]: every symbol
//! must be representable and no native pattern may decode two ways, so
//! longest-match decoding can never be ambiguous at conversion time.

pub(crate) mod trie;

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::script::ScriptTag;
use crate::symbol::{Symbol, SymbolClass};
use trie::GlyphTrie;

/// Embedded table source for `script`. The hub has no table.
pub fn embedded_source(script: ScriptTag) -> Option<&'static str> {
    let src = match script {
        ScriptTag::Hub => return None,
        ScriptTag::Latin => include_str!("data/latin.toml"),
        ScriptTag::Devanagari => include_str!("data/devanagari.toml"),
        ScriptTag::Bengali => include_str!("data/bengali.toml"),
        ScriptTag::Cyrillic => include_str!("data/cyrillic.toml"),
        ScriptTag::Gujarati => include_str!("data/gujarati.toml"),
        ScriptTag::Gurmukhi => include_str!("data/gurmukhi.toml"),
        ScriptTag::Kannada => include_str!("data/kannada.toml"),
        ScriptTag::Khmer => include_str!("data/khmer.toml"),
        ScriptTag::Malayalam => include_str!("data/malayalam.toml"),
        ScriptTag::Myanmar => include_str!("data/myanmar.toml"),
        ScriptTag::Sinhala => include_str!("data/sinhala.toml"),
        ScriptTag::Telugu => include_str!("data/telugu.toml"),
        ScriptTag::Thai => include_str!("data/thai.toml"),
        ScriptTag::Tibetan => include_str!("data/tibetan.toml"),
    };
    Some(src)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("{script}: TOML parse error: {msg}")]
    Parse { script: ScriptTag, msg: String },
    #[error("{script}: no table source")]
    NoSource { script: ScriptTag },
    #[error("{script}: table declares script {found:?}")]
    ScriptMismatch { script: ScriptTag, found: String },
    #[error("{script}: {name:?} is not a valid symbol in [{section}]")]
    UnknownSymbol {
        script: ScriptTag,
        section: &'static str,
        name: String,
    },
    #[error("{script}: [{section}] has no form for {symbol}")]
    MissingSymbol {
        script: ScriptTag,
        section: &'static str,
        symbol: Symbol,
    },
    #[error("{script}: abugida tables need a virama, or subjoined letters plus a final virama")]
    MissingVirama { script: ScriptTag },
    #[error("{script}: empty form for {name:?} in [{section}]")]
    EmptyForm {
        script: ScriptTag,
        section: &'static str,
        name: String,
    },
    #[error("{script}: punctuation key {key:?} must be a single character")]
    InvalidPunctuation { script: ScriptTag, key: String },
    #[error("{script}: pattern {pattern:?} decodes more than one way")]
    Ambiguous { script: ScriptTag, pattern: String },
}

// ---------------------------------------------------------------------------
// Raw TOML layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Model {
    Abugida,
    Alphabet,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    script: String,
    model: Model,
    #[serde(default)]
    cased: bool,
    virama: Option<String>,
    final_virama: Option<String>,
    #[serde(default)]
    prebase: Vec<String>,
    #[serde(default)]
    letters: BTreeMap<String, String>,
    #[serde(default)]
    consonants: BTreeMap<String, String>,
    #[serde(default)]
    vowels: BTreeMap<String, String>,
    #[serde(default)]
    signs: BTreeMap<String, String>,
    #[serde(default)]
    marks: BTreeMap<String, String>,
    #[serde(default)]
    subjoined: BTreeMap<String, String>,
    #[serde(default)]
    punctuation: BTreeMap<String, String>,
    contextual: Option<RawContextual>,
    #[serde(default)]
    aliases: RawAliases,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawContextual {
    after: Vec<String>,
    signs: BTreeMap<String, String>,
}

/// Decode-only alternative spellings, keyed by native text.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAliases {
    #[serde(default)]
    letters: BTreeMap<String, String>,
    #[serde(default)]
    consonants: BTreeMap<String, String>,
    #[serde(default)]
    subjoined: BTreeMap<String, String>,
    #[serde(default)]
    vowels: BTreeMap<String, String>,
    #[serde(default)]
    signs: BTreeMap<String, String>,
    #[serde(default)]
    marks: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Validated tables
// ---------------------------------------------------------------------------

/// What a native pattern decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Glyph {
    /// Alphabet letter: the symbol itself, no inherent vowel.
    Letter(Symbol),
    Consonant(Symbol),
    /// Below-base consonant form; the consonant before it has no vowel.
    Subjoined(Symbol),
    /// Independent vowel (including carrier sequences).
    Vowel(Symbol),
    Sign(Symbol),
    /// Vowel sign stored before its consonant.
    PrebaseSign(Symbol),
    Virama,
    Niggahita,
    /// Native punctuation standing for an ASCII literal.
    Punct(char),
}

/// Native forms indexed by [`Symbol::index`].
#[derive(Debug, Clone)]
pub(crate) struct Forms(Vec<Option<String>>);

impl Forms {
    fn new() -> Self {
        Forms(vec![None; Symbol::COUNT])
    }

    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.0[symbol.index()].as_deref()
    }

    fn set(&mut self, symbol: Symbol, form: String) {
        self.0[symbol.index()] = Some(form);
    }

    fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        Symbol::ALL
            .into_iter()
            .filter_map(|s| self.get(s).map(|f| (s, f)))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Contextual {
    after: Vec<Symbol>,
    signs: Forms,
}

impl Contextual {
    /// Variant sign for `vowel` when it follows `consonant`, if any.
    pub fn sign(&self, consonant: Symbol, vowel: Symbol) -> Option<&str> {
        if self.after.contains(&consonant) {
            self.signs.get(vowel)
        } else {
            None
        }
    }
}

pub(crate) struct AbugidaTable {
    pub script: ScriptTag,
    pub consonants: Forms,
    pub vowels: Forms,
    pub signs: Forms,
    pub subjoined: Option<Forms>,
    pub niggahita: String,
    /// Mark between cluster consonants; `None` when subjoined forms are used.
    pub joiner: Option<String>,
    pub final_virama: String,
    pub prebase: Vec<Symbol>,
    pub contextual: Option<Contextual>,
    pub punctuation: BTreeMap<char, String>,
    pub trie: GlyphTrie<Glyph>,
    pub repertoire: BTreeSet<char>,
}

pub(crate) struct AlphabetTable {
    pub script: ScriptTag,
    pub cased: bool,
    pub letters: Forms,
    pub punctuation: BTreeMap<char, String>,
    pub trie: GlyphTrie<Glyph>,
    pub repertoire: BTreeSet<char>,
}

pub(crate) enum ScriptTable {
    Abugida(AbugidaTable),
    Alphabet(AlphabetTable),
}

/// Parse and validate the table for `script` from TOML text.
pub(crate) fn parse_table(script: ScriptTag, toml_str: &str) -> Result<ScriptTable, TableError> {
    let raw: RawTable = toml::from_str(toml_str).map_err(|e| TableError::Parse {
        script,
        msg: e.to_string(),
    })?;

    if raw.script.parse::<ScriptTag>().ok() != Some(script) {
        return Err(TableError::ScriptMismatch {
            script,
            found: raw.script,
        });
    }

    let mut builder = TrieBuilder::new(script);
    let punctuation = punctuation(script, &raw.punctuation)?;
    for (&hub_char, native) in &punctuation {
        builder.insert(native, Glyph::Punct(hub_char))?;
    }

    match raw.model {
        Model::Alphabet => build_alphabet(script, raw, punctuation, builder),
        Model::Abugida => build_abugida(script, raw, punctuation, builder),
    }
}

fn build_alphabet(
    script: ScriptTag,
    raw: RawTable,
    punctuation: BTreeMap<char, String>,
    mut builder: TrieBuilder,
) -> Result<ScriptTable, TableError> {
    let letters = forms(script, "letters", &raw.letters, |_| true)?;
    require(script, "letters", &letters, Symbol::ALL)?;
    for (symbol, form) in letters.iter() {
        builder.insert(form, Glyph::Letter(symbol))?;
    }
    for (native, symbol) in aliases(script, "aliases.letters", &raw.aliases.letters, |_| true)? {
        builder.insert(&native, Glyph::Letter(symbol))?;
    }

    let (trie, repertoire) = builder.finish();
    Ok(ScriptTable::Alphabet(AlphabetTable {
        script,
        cased: raw.cased,
        letters,
        punctuation,
        trie,
        repertoire,
    }))
}

fn build_abugida(
    script: ScriptTag,
    raw: RawTable,
    punctuation: BTreeMap<char, String>,
    mut builder: TrieBuilder,
) -> Result<ScriptTable, TableError> {
    let is_consonant = |s: Symbol| s.is_consonant();
    let is_sign = |s: Symbol| s.is_vowel() && s != Symbol::A;
    let is_mark = |s: Symbol| s.class() == SymbolClass::Niggahita;

    let consonants = forms(script, "consonants", &raw.consonants, is_consonant)?;
    require(script, "consonants", &consonants, Symbol::consonants())?;
    let vowels = forms(script, "vowels", &raw.vowels, Symbol::is_vowel)?;
    require(script, "vowels", &vowels, Symbol::vowels())?;
    let signs = forms(script, "signs", &raw.signs, is_sign)?;
    require(script, "signs", &signs, Symbol::vowels().filter(|s| *s != Symbol::A))?;
    let marks = forms(script, "marks", &raw.marks, is_mark)?;
    let niggahita = marks
        .get(Symbol::Niggahita)
        .ok_or(TableError::MissingSymbol {
            script,
            section: "marks",
            symbol: Symbol::Niggahita,
        })?
        .to_string();

    let subjoined = if raw.subjoined.is_empty() {
        None
    } else {
        let sub = forms(script, "subjoined", &raw.subjoined, is_consonant)?;
        require(script, "subjoined", &sub, Symbol::consonants())?;
        Some(sub)
    };

    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    let joiner = non_empty(raw.virama);
    let final_virama = non_empty(raw.final_virama)
        .or_else(|| joiner.clone())
        .ok_or(TableError::MissingVirama { script })?;
    if joiner.is_none() && subjoined.is_none() {
        return Err(TableError::MissingVirama { script });
    }
    // Subjoined letters replace the joiner entirely.
    let joiner = if subjoined.is_some() { None } else { joiner };

    let prebase = raw
        .prebase
        .iter()
        .map(|name| symbol_in(script, "prebase", name, is_sign))
        .collect::<Result<Vec<_>, _>>()?;
    let sign_glyph = |s: Symbol| {
        if prebase.contains(&s) {
            Glyph::PrebaseSign(s)
        } else {
            Glyph::Sign(s)
        }
    };

    let contextual = match raw.contextual {
        Some(ctx) => {
            let after = ctx
                .after
                .iter()
                .map(|name| symbol_in(script, "contextual.after", name, is_consonant))
                .collect::<Result<Vec<_>, _>>()?;
            let signs = forms(script, "contextual.signs", &ctx.signs, is_sign)?;
            Some(Contextual { after, signs })
        }
        None => None,
    };

    for (symbol, form) in consonants.iter() {
        builder.insert(form, Glyph::Consonant(symbol))?;
    }
    if let Some(sub) = &subjoined {
        for (symbol, form) in sub.iter() {
            builder.insert(form, Glyph::Subjoined(symbol))?;
        }
    }
    for (symbol, form) in vowels.iter() {
        builder.insert(form, Glyph::Vowel(symbol))?;
    }
    for (symbol, form) in signs.iter() {
        builder.insert(form, sign_glyph(symbol))?;
    }
    if let Some(ctx) = &contextual {
        for (symbol, form) in ctx.signs.iter() {
            builder.insert(form, sign_glyph(symbol))?;
        }
    }
    builder.insert(&niggahita, Glyph::Niggahita)?;
    builder.insert(&final_virama, Glyph::Virama)?;
    if let Some(j) = &joiner {
        builder.insert(j, Glyph::Virama)?;
    }

    let al = &raw.aliases;
    for (native, s) in aliases(script, "aliases.consonants", &al.consonants, is_consonant)? {
        builder.insert(&native, Glyph::Consonant(s))?;
    }
    for (native, s) in aliases(script, "aliases.subjoined", &al.subjoined, is_consonant)? {
        builder.insert(&native, Glyph::Subjoined(s))?;
    }
    for (native, s) in aliases(script, "aliases.vowels", &al.vowels, Symbol::is_vowel)? {
        builder.insert(&native, Glyph::Vowel(s))?;
    }
    for (native, s) in aliases(script, "aliases.signs", &al.signs, is_sign)? {
        builder.insert(&native, sign_glyph(s))?;
    }
    for (native, _) in aliases(script, "aliases.marks", &al.marks, is_mark)? {
        builder.insert(&native, Glyph::Niggahita)?;
    }

    let (trie, repertoire) = builder.finish();
    Ok(ScriptTable::Abugida(AbugidaTable {
        script,
        consonants,
        vowels,
        signs,
        subjoined,
        niggahita,
        joiner,
        final_virama,
        prebase,
        contextual,
        punctuation,
        trie,
        repertoire,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct TrieBuilder {
    script: ScriptTag,
    trie: GlyphTrie<Glyph>,
    repertoire: BTreeSet<char>,
}

impl TrieBuilder {
    fn new(script: ScriptTag) -> Self {
        Self {
            script,
            trie: GlyphTrie::new(),
            repertoire: BTreeSet::new(),
        }
    }

    fn insert(&mut self, pattern: &str, glyph: Glyph) -> Result<(), TableError> {
        self.trie
            .insert(pattern, glyph)
            .map_err(|_| TableError::Ambiguous {
                script: self.script,
                pattern: pattern.to_string(),
            })?;
        self.repertoire.extend(pattern.chars());
        Ok(())
    }

    fn finish(self) -> (GlyphTrie<Glyph>, BTreeSet<char>) {
        (self.trie, self.repertoire)
    }
}

fn symbol_in(
    script: ScriptTag,
    section: &'static str,
    name: &str,
    allowed: impl Fn(Symbol) -> bool,
) -> Result<Symbol, TableError> {
    Symbol::from_iast(name)
        .filter(|s| allowed(*s))
        .ok_or_else(|| TableError::UnknownSymbol {
            script,
            section,
            name: name.to_string(),
        })
}

fn forms(
    script: ScriptTag,
    section: &'static str,
    raw: &BTreeMap<String, String>,
    allowed: impl Fn(Symbol) -> bool,
) -> Result<Forms, TableError> {
    let mut out = Forms::new();
    for (name, form) in raw {
        let symbol = symbol_in(script, section, name, &allowed)?;
        if form.is_empty() {
            return Err(TableError::EmptyForm {
                script,
                section,
                name: name.clone(),
            });
        }
        out.set(symbol, form.clone());
    }
    Ok(out)
}

fn aliases(
    script: ScriptTag,
    section: &'static str,
    raw: &BTreeMap<String, String>,
    allowed: impl Fn(Symbol) -> bool,
) -> Result<Vec<(String, Symbol)>, TableError> {
    raw.iter()
        .map(|(native, name)| {
            if native.is_empty() {
                return Err(TableError::EmptyForm {
                    script,
                    section,
                    name: name.clone(),
                });
            }
            Ok((native.clone(), symbol_in(script, section, name, &allowed)?))
        })
        .collect()
}

fn require(
    script: ScriptTag,
    section: &'static str,
    forms: &Forms,
    symbols: impl IntoIterator<Item = Symbol>,
) -> Result<(), TableError> {
    match symbols.into_iter().find(|s| forms.get(*s).is_none()) {
        Some(symbol) => Err(TableError::MissingSymbol {
            script,
            section,
            symbol,
        }),
        None => Ok(()),
    }
}

fn punctuation(
    script: ScriptTag,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<char, String>, TableError> {
    let mut out = BTreeMap::new();
    for (key, native) in raw {
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(TableError::InvalidPunctuation {
                script,
                key: key.clone(),
            });
        };
        if native.is_empty() {
            return Err(TableError::EmptyForm {
                script,
                section: "punctuation",
                name: key.clone(),
            });
        }
        out.insert(ch, native.clone());
    }
    Ok(out)
}
