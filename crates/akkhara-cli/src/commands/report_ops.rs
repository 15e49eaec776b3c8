use std::fs;

use unicode_width::UnicodeWidthStr;

use akkhara_core::charfreq::{char_frequencies, CharClass, CharFreqReport};

use super::{load_converter, parse_script};

/// Printable label for a char: whitespace and controls escaped, combining
/// marks shown on a dotted circle.
fn char_label(ch: char) -> String {
    if ch.is_whitespace() || ch.is_control() {
        return ch.escape_debug().to_string();
    }
    let s = ch.to_string();
    if UnicodeWidthStr::width(s.as_str()) == 0 {
        format!("\u{25CC}{ch}")
    } else {
        s
    }
}

fn pad(label: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(label);
    if w < width {
        format!("{label}{}", " ".repeat(width - w))
    } else {
        label.to_string()
    }
}

pub fn format_charfreq(report: &CharFreqReport, anomalies_only: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {} ({} chars, {} distinct, {} anomalies) ===\n",
        report.script, report.total, report.distinct, report.anomalies
    ));
    for c in &report.chars {
        if anomalies_only && c.class != CharClass::Anomaly {
            continue;
        }
        let class = match c.class {
            CharClass::Standard => "",
            CharClass::Neutral => "neutral",
            CharClass::Anomaly => "ANOMALY",
        };
        out.push_str(&format!(
            "  {} {:<8} {:>8}  {}\n",
            pad(&char_label(c.ch), 6),
            c.codepoint,
            c.count,
            class
        ));
    }
    out
}

pub fn charfreq_cmd(script: &str, input_file: &str, json: bool, anomalies_only: bool) {
    let script = parse_script(script);
    let text = die!(
        fs::read_to_string(input_file),
        "Failed to read input file {input_file}: {}"
    );
    let conv = load_converter();
    let codec = die!(conv.codec(script), "Error: {}");
    let mut report = char_frequencies(&text, codec.as_ref(), conv.wildcards());

    if json {
        if anomalies_only {
            report.chars.retain(|c| c.class == CharClass::Anomaly);
        }
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "JSON serialization failed: {}")
        );
    } else {
        print!("{}", format_charfreq(&report, anomalies_only));
    }
}
