//! Script tags: the only vocabulary callers use to select a conversion.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScriptTag {
    /// The IPE hub encoding, addressable like any other script.
    Hub,
    Latin,
    Devanagari,
    Bengali,
    Cyrillic,
    Gujarati,
    Gurmukhi,
    Kannada,
    Khmer,
    Malayalam,
    Myanmar,
    Sinhala,
    Telugu,
    Thai,
    Tibetan,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown script: {0}")]
pub struct UnknownScript(pub String);

impl ScriptTag {
    pub const COUNT: usize = 15;

    pub const ALL: [ScriptTag; Self::COUNT] = [
        ScriptTag::Hub,
        ScriptTag::Latin,
        ScriptTag::Devanagari,
        ScriptTag::Bengali,
        ScriptTag::Cyrillic,
        ScriptTag::Gujarati,
        ScriptTag::Gurmukhi,
        ScriptTag::Kannada,
        ScriptTag::Khmer,
        ScriptTag::Malayalam,
        ScriptTag::Myanmar,
        ScriptTag::Sinhala,
        ScriptTag::Telugu,
        ScriptTag::Thai,
        ScriptTag::Tibetan,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Every tag except [`ScriptTag::Hub`].
    pub fn native() -> impl Iterator<Item = ScriptTag> {
        Self::ALL.into_iter().filter(|s| *s != ScriptTag::Hub)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScriptTag::Hub => "hub",
            ScriptTag::Latin => "latin",
            ScriptTag::Devanagari => "devanagari",
            ScriptTag::Bengali => "bengali",
            ScriptTag::Cyrillic => "cyrillic",
            ScriptTag::Gujarati => "gujarati",
            ScriptTag::Gurmukhi => "gurmukhi",
            ScriptTag::Kannada => "kannada",
            ScriptTag::Khmer => "khmer",
            ScriptTag::Malayalam => "malayalam",
            ScriptTag::Myanmar => "myanmar",
            ScriptTag::Sinhala => "sinhala",
            ScriptTag::Telugu => "telugu",
            ScriptTag::Thai => "thai",
            ScriptTag::Tibetan => "tibetan",
        }
    }

    /// ISO 15924 code (`ipe` for the hub).
    pub fn code(self) -> &'static str {
        match self {
            ScriptTag::Hub => "ipe",
            ScriptTag::Latin => "latn",
            ScriptTag::Devanagari => "deva",
            ScriptTag::Bengali => "beng",
            ScriptTag::Cyrillic => "cyrl",
            ScriptTag::Gujarati => "gujr",
            ScriptTag::Gurmukhi => "guru",
            ScriptTag::Kannada => "knda",
            ScriptTag::Khmer => "khmr",
            ScriptTag::Malayalam => "mlym",
            ScriptTag::Myanmar => "mymr",
            ScriptTag::Sinhala => "sinh",
            ScriptTag::Telugu => "telu",
            ScriptTag::Thai => "thai",
            ScriptTag::Tibetan => "tibt",
        }
    }

    /// Script owning `ch` by Unicode block, or `None` for characters that
    /// belong to no script (digits, whitespace, ASCII punctuation, combining
    /// diacritics).
    ///
    /// Only the C1 control range U+0080..=U+009F marks hub text. Hub codes
    /// above it share the Latin-1 block with ordinary signs (NBSP, ©) and
    /// are left neutral here.
    pub fn of_char(ch: char) -> Option<ScriptTag> {
        let cp = ch as u32;
        BLOCKS
            .iter()
            .find(|(lo, hi, _)| (*lo..=*hi).contains(&cp))
            .map(|(_, _, script)| *script)
            .or_else(|| ch.is_ascii_alphabetic().then_some(ScriptTag::Latin))
    }
}

const BLOCKS: &[(u32, u32, ScriptTag)] = &[
    (0x0080, 0x009F, ScriptTag::Hub),
    (0x00C0, 0x00D6, ScriptTag::Latin),
    (0x00D8, 0x00F6, ScriptTag::Latin),
    (0x00F8, 0x024F, ScriptTag::Latin),
    (0x1E00, 0x1EFF, ScriptTag::Latin),
    (0x0400, 0x04FF, ScriptTag::Cyrillic),
    (0x0900, 0x097F, ScriptTag::Devanagari),
    (0x0980, 0x09FF, ScriptTag::Bengali),
    (0x0A00, 0x0A7F, ScriptTag::Gurmukhi),
    (0x0A80, 0x0AFF, ScriptTag::Gujarati),
    (0x0C00, 0x0C7F, ScriptTag::Telugu),
    (0x0C80, 0x0CFF, ScriptTag::Kannada),
    (0x0D00, 0x0D7F, ScriptTag::Malayalam),
    (0x0D80, 0x0DFF, ScriptTag::Sinhala),
    (0x0E00, 0x0E7F, ScriptTag::Thai),
    (0x0F00, 0x0FFF, ScriptTag::Tibetan),
    (0x1000, 0x109F, ScriptTag::Myanmar),
    (0x1780, 0x17FF, ScriptTag::Khmer),
    (0x19E0, 0x19FF, ScriptTag::Khmer),
];

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptTag {
    type Err = UnknownScript;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lower || t.code() == lower)
            .ok_or_else(|| UnknownScript(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_codes() {
        for tag in ScriptTag::ALL {
            assert_eq!(tag.name().parse::<ScriptTag>().unwrap(), tag);
            assert_eq!(tag.code().parse::<ScriptTag>().unwrap(), tag);
        }
        assert_eq!("Devanagari".parse::<ScriptTag>().unwrap(), ScriptTag::Devanagari);
        assert_eq!(" IPE ".parse::<ScriptTag>().unwrap(), ScriptTag::Hub);
        assert!("klingon".parse::<ScriptTag>().is_err());
    }

    #[test]
    fn index_matches_all() {
        for (i, tag) in ScriptTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
        assert_eq!(ScriptTag::native().count(), 14);
    }

    #[test]
    fn of_char_blocks() {
        assert_eq!(ScriptTag::of_char('k'), Some(ScriptTag::Latin));
        assert_eq!(ScriptTag::of_char('ā'), Some(ScriptTag::Latin));
        assert_eq!(ScriptTag::of_char('ṃ'), Some(ScriptTag::Latin));
        assert_eq!(ScriptTag::of_char('क'), Some(ScriptTag::Devanagari));
        assert_eq!(ScriptTag::of_char('ক'), Some(ScriptTag::Bengali));
        assert_eq!(ScriptTag::of_char('к'), Some(ScriptTag::Cyrillic));
        assert_eq!(ScriptTag::of_char('ก'), Some(ScriptTag::Thai));
        assert_eq!(ScriptTag::of_char('က'), Some(ScriptTag::Myanmar));
        assert_eq!(ScriptTag::of_char('ក'), Some(ScriptTag::Khmer));
        assert_eq!(ScriptTag::of_char('ཀ'), Some(ScriptTag::Tibetan));
        assert_eq!(ScriptTag::of_char('\u{81}'), Some(ScriptTag::Hub));
        assert_eq!(ScriptTag::of_char('1'), None);
        assert_eq!(ScriptTag::of_char(' '), None);
        assert_eq!(ScriptTag::of_char('*'), None);
        assert_eq!(ScriptTag::of_char('\u{0304}'), None);
        assert_eq!(ScriptTag::of_char('×'), None);
        assert_eq!(ScriptTag::of_char('\u{A0}'), None);
        assert_eq!(ScriptTag::of_char('©'), None);
    }
}
