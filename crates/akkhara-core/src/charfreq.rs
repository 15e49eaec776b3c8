//! Character frequency analysis against a script's repertoire.
//!
//! Used to audit source texts before conversion: chars the table knows
//! are standard, layout and ASCII punctuation are neutral, anything else
//! is an anomaly that will pass through conversion as a literal.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codec::ScriptCodec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Standard,
    Neutral,
    Anomaly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharCount {
    pub ch: char,
    /// `U+XXXX` notation.
    pub codepoint: String,
    pub count: usize,
    pub class: CharClass,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharFreqReport {
    pub script: String,
    pub total: usize,
    pub distinct: usize,
    pub anomalies: usize,
    /// Most frequent first; ties in code point order.
    pub chars: Vec<CharCount>,
}

impl CharFreqReport {
    pub fn anomalies(&self) -> impl Iterator<Item = &CharCount> {
        self.chars.iter().filter(|c| c.class == CharClass::Anomaly)
    }
}

pub fn classify(ch: char, codec: &dyn ScriptCodec, wildcards: &[char]) -> CharClass {
    let repertoire = codec.repertoire();
    if repertoire.contains(&ch) || ch.to_lowercase().all(|l| repertoire.contains(&l)) {
        CharClass::Standard
    } else if ch.is_whitespace()
        || ch.is_ascii_digit()
        || ch.is_ascii_punctuation()
        || wildcards.contains(&ch)
    {
        CharClass::Neutral
    } else {
        CharClass::Anomaly
    }
}

pub fn char_frequencies(text: &str, codec: &dyn ScriptCodec, wildcards: &[char]) -> CharFreqReport {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for ch in text.chars() {
        *counts.entry(ch).or_default() += 1;
    }

    let mut chars: Vec<CharCount> = counts
        .into_iter()
        .map(|(ch, count)| CharCount {
            ch,
            codepoint: format!("U+{:04X}", ch as u32),
            count,
            class: classify(ch, codec, wildcards),
        })
        .collect();
    // Stable sort keeps code point order among equal counts.
    chars.sort_by(|a, b| b.count.cmp(&a.count));

    CharFreqReport {
        script: codec.script().to_string(),
        total: chars.iter().map(|c| c.count).sum(),
        distinct: chars.len(),
        anomalies: chars.iter().filter(|c| c.class == CharClass::Anomaly).count(),
        chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Converter;
    use crate::script::ScriptTag;

    #[test]
    fn devanagari_report() {
        let conv = Converter::new();
        let deva = conv.codec(ScriptTag::Devanagari).unwrap();
        let report = char_frequencies("धम्मो धम्मो। x*", deva.as_ref(), &['*']);

        assert_eq!(report.script, "devanagari");
        assert_eq!(report.total, 15);
        let first = &report.chars[0];
        assert_eq!((first.ch, first.count), ('म', 4));
        assert_eq!(first.codepoint, "U+092E");
        assert_eq!(first.class, CharClass::Standard);

        let class_of = |c: char| report.chars.iter().find(|x| x.ch == c).map(|x| x.class);
        assert_eq!(class_of('।'), Some(CharClass::Standard));
        assert_eq!(class_of(' '), Some(CharClass::Neutral));
        assert_eq!(class_of('*'), Some(CharClass::Neutral));
        assert_eq!(class_of('x'), Some(CharClass::Anomaly));
        assert_eq!(report.anomalies, 1);
        assert_eq!(report.anomalies().count(), 1);
    }

    #[test]
    fn latin_capitals_are_standard() {
        let conv = Converter::new();
        let latn = conv.codec(ScriptTag::Latin).unwrap();
        assert_eq!(classify('Ā', latn.as_ref(), &[]), CharClass::Standard);
        assert_eq!(classify('Q', latn.as_ref(), &[]), CharClass::Anomaly);
        assert_eq!(classify('7', latn.as_ref(), &[]), CharClass::Neutral);
    }

    #[test]
    fn empty_text() {
        let conv = Converter::new();
        let thai = conv.codec(ScriptTag::Thai).unwrap();
        let report = char_frequencies("", thai.as_ref(), &[]);
        assert_eq!(report.total, 0);
        assert!(report.chars.is_empty());
    }

    #[test]
    fn serializes_class_lowercase() {
        let count = CharCount {
            ch: 'a',
            codepoint: "U+0061".into(),
            count: 1,
            class: CharClass::Anomaly,
        };
        let value = toml::Value::try_from(&count).unwrap();
        assert_eq!(value.get("class").and_then(|v| v.as_str()), Some("anomaly"));
    }
}
