use akkhara_core::hub::{self, Case};
use akkhara_core::{detect_script, Converter, HubSeq, ScriptTag, TableError};

use super::{load_converter, parse_script, read_input};

/// `None` stands for `any`: the source is detected per run.
pub fn parse_source(name: &str) -> Option<ScriptTag> {
    if name.eq_ignore_ascii_case("any") {
        None
    } else {
        Some(parse_script(name))
    }
}

pub fn convert_text(
    conv: &Converter,
    text: &str,
    source: Option<ScriptTag>,
    target: ScriptTag,
    keep_wildcards: bool,
) -> Result<String, TableError> {
    match source {
        Some(source) if keep_wildcards => conv.convert_preserving_wildcards(text, source, target),
        Some(source) => conv.convert(text, source, target),
        None => conv.convert_any(text, target),
    }
}

pub fn convert_cmd(from: &str, to: &str, text: Option<&str>, file: Option<&str>, wildcards: bool) {
    let source = parse_source(from);
    let target = parse_script(to);
    let conv = load_converter();
    let input = read_input(text, file);
    let out = die!(
        convert_text(&conv, &input, source, target, wildcards),
        "Error: {}"
    );
    if text.is_some() {
        println!("{out}");
    } else {
        print!("{out}");
    }
}

/// One line of a hub dump.
#[derive(Debug, PartialEq, Eq)]
pub struct HubRow {
    pub code: String,
    pub name: String,
    pub case: Option<Case>,
}

pub fn hub_rows(seq: &HubSeq) -> Vec<HubRow> {
    seq.iter()
        .map(|token| match token.unit.as_symbol() {
            Some(symbol) => HubRow {
                code: format!("{:02X}", symbol.hub_code()),
                name: symbol.iast().to_string(),
                case: Some(token.case),
            },
            None => {
                // Unreachable fallback: a unit that is not a symbol is a literal.
                let ch = token.unit.as_literal().unwrap_or(char::REPLACEMENT_CHARACTER);
                HubRow {
                    code: format!("U+{:04X}", ch as u32),
                    name: format!("{ch:?}"),
                    case: None,
                }
            }
        })
        .collect()
}

pub fn hub_cmd(from: &str, text: &str, bytes: bool) {
    let conv = load_converter();
    let seq = match parse_source(from) {
        Some(source) => die!(conv.decode(text, source), "Error: {}"),
        None => die!(conv.decode_any(text), "Error: {}"),
    };

    for row in hub_rows(&seq) {
        match row.case {
            Some(Case::Lower) | None => println!("{:<8} {}", row.code, row.name),
            Some(case) => println!("{:<8} {} ({case:?})", row.code, row.name),
        }
    }
    println!("{} units", seq.len());

    if bytes {
        let raw = die!(hub::to_legacy_bytes(&seq), "Error: {}");
        let hex: Vec<String> = raw.iter().map(|b| format!("{b:02X}")).collect();
        println!("bytes: {}", hex.join(" "));
    }
}

pub fn detect_cmd(text: &str) {
    match detect_script(text) {
        Some(script) => println!("{script}"),
        None => {
            eprintln!("No script detected");
            std::process::exit(1);
        }
    }
}
