//! The closed Pali symbol inventory and its fixed hub codes.
//!
//! Symbols are listed in traditional order (vowels, the five stop rows,
//! the remaining consonants, niggahita). Hub codes are assigned
//! consecutively from [`FIRST_CODE`] in that order; external IPE data
//! depends on the exact values, so the order must never change.

use std::fmt;

/// Hub code of the first symbol (the vowel `a`).
pub const FIRST_CODE: u32 = 0x81;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolClass {
    Vowel,
    Consonant,
    Niggahita,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    A,
    Aa,
    I,
    Ii,
    U,
    Uu,
    E,
    O,
    K,
    Kh,
    G,
    Gh,
    Nga,
    C,
    Ch,
    J,
    Jh,
    Nya,
    Tt,
    Tth,
    Dd,
    Ddh,
    Nna,
    T,
    Th,
    D,
    Dh,
    N,
    P,
    Ph,
    B,
    Bh,
    M,
    Y,
    R,
    L,
    V,
    S,
    H,
    Ll,
    Niggahita,
}

impl Symbol {
    pub const COUNT: usize = 41;

    pub const ALL: [Symbol; Self::COUNT] = [
        Symbol::A,
        Symbol::Aa,
        Symbol::I,
        Symbol::Ii,
        Symbol::U,
        Symbol::Uu,
        Symbol::E,
        Symbol::O,
        Symbol::K,
        Symbol::Kh,
        Symbol::G,
        Symbol::Gh,
        Symbol::Nga,
        Symbol::C,
        Symbol::Ch,
        Symbol::J,
        Symbol::Jh,
        Symbol::Nya,
        Symbol::Tt,
        Symbol::Tth,
        Symbol::Dd,
        Symbol::Ddh,
        Symbol::Nna,
        Symbol::T,
        Symbol::Th,
        Symbol::D,
        Symbol::Dh,
        Symbol::N,
        Symbol::P,
        Symbol::Ph,
        Symbol::B,
        Symbol::Bh,
        Symbol::M,
        Symbol::Y,
        Symbol::R,
        Symbol::L,
        Symbol::V,
        Symbol::S,
        Symbol::H,
        Symbol::Ll,
        Symbol::Niggahita,
    ];

    /// IAST names, indexed like [`Symbol::ALL`]. Table files key on these.
    const NAMES: [&'static str; Self::COUNT] = [
        "a", "ā", "i", "ī", "u", "ū", "e", "o", "k", "kh", "g", "gh", "ṅ", "c", "ch", "j", "jh",
        "ñ", "ṭ", "ṭh", "ḍ", "ḍh", "ṇ", "t", "th", "d", "dh", "n", "p", "ph", "b", "bh", "m", "y",
        "r", "l", "v", "s", "h", "ḷ", "ṃ",
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn class(self) -> SymbolClass {
        match self {
            Symbol::A
            | Symbol::Aa
            | Symbol::I
            | Symbol::Ii
            | Symbol::U
            | Symbol::Uu
            | Symbol::E
            | Symbol::O => SymbolClass::Vowel,
            Symbol::Niggahita => SymbolClass::Niggahita,
            _ => SymbolClass::Consonant,
        }
    }

    pub fn is_vowel(self) -> bool {
        self.class() == SymbolClass::Vowel
    }

    pub fn is_consonant(self) -> bool {
        self.class() == SymbolClass::Consonant
    }

    pub fn iast(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    pub fn from_iast(name: &str) -> Option<Symbol> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Self::ALL[i])
    }

    pub fn hub_code(self) -> u32 {
        FIRST_CODE + self as u32
    }

    pub fn from_hub_code(code: u32) -> Option<Symbol> {
        let offset = code.checked_sub(FIRST_CODE)? as usize;
        Self::ALL.get(offset).copied()
    }

    pub fn vowels() -> impl Iterator<Item = Symbol> {
        Self::ALL.into_iter().filter(|s| s.is_vowel())
    }

    pub fn consonants() -> impl Iterator<Item = Symbol> {
        Self::ALL.into_iter().filter(|s| s.is_consonant())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iast())
    }
}
