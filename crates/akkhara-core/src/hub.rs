//! The IPE hub: fixed-width code units, hub text and the legacy byte layout.
//!
//! A hub sequence is a list of [`HubToken`]s in phonetic order. Each token
//! carries a [`HubUnit`] (a symbol code or a tagged literal) and an
//! auxiliary [`Case`] flag recorded by case-bearing decoders.
//!
//! Hub text is the string form returned when converting *to* the hub:
//!
//! - symbols are the char whose code point is the symbol's hub code;
//! - a non-lower case flag is written as a mark before the symbol
//!   ([`UPPER_MARK`], [`TITLE_MARK`]);
//! - literals inside the reserved block U+0080..=U+00BF are written behind
//!   [`ESCAPE_MARK`]; all other literals are written as themselves;
//! - verbatim literals (native text that must not be re-punctuated, such as
//!   an ASCII `.` inside Devanagari) are written behind [`ESCAPE_MARK`] too.
//!
//! The legacy single-byte layout is hub text with every char narrowed to
//! one byte, which only works while every literal is at most U+00FF.

use std::fmt;
use std::ops::RangeInclusive;

use crate::symbol::Symbol;

/// Tag bit that keeps literal units disjoint from symbol codes.
const LITERAL_BIT: u32 = 0x8000_0000;
/// Literal that encoders emit as-is, skipping their punctuation map.
const VERBATIM_BIT: u32 = 0x4000_0000;

/// Code points reserved for hub marks and symbols.
pub const RESERVED: RangeInclusive<u32> = 0x80..=0xBF;

pub const ESCAPE_MARK: char = '\u{80}';
pub const UPPER_MARK: char = '\u{AE}';
pub const TITLE_MARK: char = '\u{AF}';

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HubUnit(u32);

impl HubUnit {
    pub fn symbol(symbol: Symbol) -> Self {
        HubUnit(symbol.hub_code())
    }

    pub fn literal(ch: char) -> Self {
        HubUnit(LITERAL_BIT | ch as u32)
    }

    pub fn verbatim(ch: char) -> Self {
        HubUnit(LITERAL_BIT | VERBATIM_BIT | ch as u32)
    }

    /// The raw fixed-width code unit.
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn as_symbol(self) -> Option<Symbol> {
        if self.0 & LITERAL_BIT != 0 {
            return None;
        }
        Symbol::from_hub_code(self.0)
    }

    pub fn as_literal(self) -> Option<char> {
        if self.0 & LITERAL_BIT == 0 {
            return None;
        }
        char::from_u32(self.0 & !(LITERAL_BIT | VERBATIM_BIT))
    }

    pub fn is_verbatim(self) -> bool {
        self.0 & (LITERAL_BIT | VERBATIM_BIT) == LITERAL_BIT | VERBATIM_BIT
    }
}

impl fmt::Debug for HubUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.as_symbol(), self.as_literal()) {
            (Some(s), _) => write!(f, "Symbol({s})"),
            (_, Some(c)) if self.is_verbatim() => write!(f, "Verbatim({c:?})"),
            (_, Some(c)) => write!(f, "Literal({c:?})"),
            _ => write!(f, "HubUnit({:#x})", self.0),
        }
    }
}

/// Letter case of a decoded unit. Only case-bearing scripts set anything
/// other than `Lower`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Case {
    #[default]
    Lower,
    /// Every cased char upper (`KH`, or a single capital `K`).
    Upper,
    /// First char upper, the rest lower (`Kh`).
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HubToken {
    pub unit: HubUnit,
    pub case: Case,
}

impl HubToken {
    pub fn symbol(symbol: Symbol) -> Self {
        Self {
            unit: HubUnit::symbol(symbol),
            case: Case::Lower,
        }
    }

    pub fn literal(ch: char) -> Self {
        Self {
            unit: HubUnit::literal(ch),
            case: Case::Lower,
        }
    }

    pub fn verbatim(ch: char) -> Self {
        Self {
            unit: HubUnit::verbatim(ch),
            case: Case::Lower,
        }
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubSeq {
    tokens: Vec<HubToken>,
}

impl HubSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, token: HubToken) {
        self.tokens.push(token);
    }

    pub fn push_symbol(&mut self, symbol: Symbol) {
        self.tokens.push(HubToken::symbol(symbol));
    }

    pub fn push_literal(&mut self, ch: char) {
        self.tokens.push(HubToken::literal(ch));
    }

    pub fn push_verbatim(&mut self, ch: char) {
        self.tokens.push(HubToken::verbatim(ch));
    }

    pub fn append(&mut self, other: HubSeq) {
        self.tokens.extend(other.tokens);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[HubToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HubToken> {
        self.tokens.iter()
    }

    /// Case-free view of the sequence.
    pub fn units(&self) -> impl Iterator<Item = HubUnit> + '_ {
        self.tokens.iter().map(|t| t.unit)
    }

    /// Same units with every case flag cleared.
    pub fn lowercased(&self) -> HubSeq {
        self.tokens
            .iter()
            .map(|t| t.with_case(Case::Lower))
            .collect()
    }
}

impl FromIterator<HubToken> for HubSeq {
    fn from_iter<I: IntoIterator<Item = HubToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HubSeq {
    type Item = &'a HubToken;
    type IntoIter = std::slice::Iter<'a, HubToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("literal {0:?} does not fit the single-byte IPE layout")]
    NotSingleByte(char),
}

/// Render a hub sequence as hub text.
pub fn to_text(seq: &HubSeq) -> String {
    let mut out = String::with_capacity(seq.len());
    for token in seq {
        if let Some(symbol) = token.unit.as_symbol() {
            match token.case {
                Case::Lower => {}
                Case::Upper => out.push(UPPER_MARK),
                Case::Title => out.push(TITLE_MARK),
            }
            // Symbol codes are all below U+00AA.
            out.push(char::from_u32(symbol.hub_code()).unwrap_or(ESCAPE_MARK));
        } else if let Some(ch) = token.unit.as_literal() {
            if token.unit.is_verbatim() || RESERVED.contains(&(ch as u32)) {
                out.push(ESCAPE_MARK);
            }
            out.push(ch);
        }
    }
    out
}

/// Parse hub text. Never fails: chars outside the defined set are literals.
pub fn from_text(text: &str) -> HubSeq {
    let mut seq = HubSeq::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE_MARK => match chars.next() {
                Some(escaped) if RESERVED.contains(&(escaped as u32)) => seq.push_literal(escaped),
                Some(escaped) => seq.push_verbatim(escaped),
                None => seq.push_literal(ESCAPE_MARK),
            },
            UPPER_MARK | TITLE_MARK => {
                let case = if ch == UPPER_MARK {
                    Case::Upper
                } else {
                    Case::Title
                };
                match chars.peek().and_then(|c| Symbol::from_hub_code(*c as u32)) {
                    Some(symbol) => {
                        chars.next();
                        seq.push(HubToken::symbol(symbol).with_case(case));
                    }
                    None => seq.push_literal(ch),
                }
            }
            _ => match Symbol::from_hub_code(ch as u32) {
                Some(symbol) => seq.push_symbol(symbol),
                None => seq.push_literal(ch),
            },
        }
    }
    seq
}

/// Narrow hub text to the legacy single-byte layout.
pub fn to_legacy_bytes(seq: &HubSeq) -> Result<Vec<u8>, HubError> {
    to_text(seq)
        .chars()
        .map(|c| u8::try_from(c as u32).map_err(|_| HubError::NotSingleByte(c)))
        .collect()
}

/// Widen legacy single-byte data (one char per byte) and parse it.
pub fn from_legacy_bytes(bytes: &[u8]) -> HubSeq {
    let text: String = bytes.iter().map(|&b| char::from(b)).collect();
    from_text(&text)
}
