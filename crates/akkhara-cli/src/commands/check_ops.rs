//! Regression checks over line corpora: round trips, JSONL snapshots and
//! golden TOML cases.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};

use akkhara_core::script::UnknownScript;
use akkhara_core::{Converter, ScriptTag, TableError};

use super::{exit_failed, load_converter, parse_script, read_lines};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Script(#[from] UnknownScript),
    #[error("corpus parse error: {0}")]
    Corpus(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub struct RoundtripFailure {
    pub text: String,
    pub via: ScriptTag,
    pub intermediate: String,
    pub back: String,
}

/// Convert each line to every `via` script and back. A line passes when
/// the returned text matches the line as the source codec writes it,
/// either as is or lowercased for uncased scripts.
pub fn roundtrip_failures(
    conv: &Converter,
    lines: &[String],
    source: ScriptTag,
    via: &[ScriptTag],
) -> Result<Vec<RoundtripFailure>, TableError> {
    let mut failures = Vec::new();
    for text in lines {
        let decoded = conv.decode(text, source)?;
        let expected = conv.encode(&decoded, source)?;
        let expected_lower = conv.encode(&decoded.lowercased(), source)?;
        for &script in via.iter().filter(|s| **s != source) {
            let intermediate = conv.convert(text, source, script)?;
            let back = conv.convert(&intermediate, script, source)?;
            if back != expected && back != expected_lower {
                failures.push(RoundtripFailure {
                    text: text.clone(),
                    via: script,
                    intermediate,
                    back,
                });
            }
        }
    }
    Ok(failures)
}

pub fn roundtrip_cmd(from: &str, input_file: &str, via: &[String]) {
    let source = parse_script(from);
    let via: Vec<ScriptTag> = if via.is_empty() {
        ScriptTag::ALL.to_vec()
    } else {
        via.iter().map(|s| parse_script(s)).collect()
    };
    let lines = read_lines(input_file);
    let conv = load_converter();

    let failures = die!(
        roundtrip_failures(&conv, &lines, source, &via),
        "Error: {}"
    );
    for f in &failures {
        println!(
            "  \u{2717} {} via {}: {} -> {}",
            f.text, f.via, f.intermediate, f.back
        );
    }

    let checks = lines.len() * via.iter().filter(|s| **s != source).count();
    println!();
    println!("=== Summary ===");
    println!("  Lines:    {}", lines.len());
    println!("  Checks:   {checks}");
    println!("  Failed:   {}", failures.len());
    exit_failed(!failures.is_empty());
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub text: String,
    /// Rendering per target script name.
    pub outputs: BTreeMap<String, String>,
}

pub fn snapshot_entry(
    conv: &Converter,
    text: &str,
    source: ScriptTag,
) -> Result<SnapshotEntry, TableError> {
    let mut outputs = BTreeMap::new();
    for target in ScriptTag::ALL.into_iter().filter(|s| *s != source) {
        outputs.insert(target.name().to_string(), conv.convert(text, source, target)?);
    }
    Ok(SnapshotEntry {
        text: text.to_string(),
        outputs,
    })
}

pub fn snapshot_cmd(from: &str, input_file: &str, output_file: &str) {
    let source = parse_script(from);
    let lines = read_lines(input_file);
    let conv = load_converter();

    let file = die!(
        fs::File::create(output_file),
        "Failed to create output file {output_file}: {}"
    );
    let mut writer = BufWriter::new(file);
    for text in &lines {
        let entry = die!(snapshot_entry(&conv, text, source), "Error: {}");
        let line = die!(serde_json::to_string(&entry), "JSON serialization failed: {}");
        die!(writeln!(writer, "{line}"), "Failed to write: {}");
    }
    die!(writer.flush(), "Failed to write: {}");

    eprintln!("Snapshot written: {} lines -> {output_file}", lines.len());
}

#[derive(Debug, PartialEq, Eq)]
pub struct ChangedOutput {
    pub text: String,
    pub script: String,
    pub was: String,
    pub now: String,
}

#[derive(Debug, Default)]
pub struct SnapshotDiff {
    pub total: usize,
    pub same: usize,
    pub changed: Vec<ChangedOutput>,
    pub new: Vec<String>,
    pub removed: Vec<String>,
}

impl SnapshotDiff {
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}

pub fn parse_snapshot(content: &str) -> Result<Vec<SnapshotEntry>, serde_json::Error> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

pub fn diff_snapshots(baseline: &[SnapshotEntry], current: &[SnapshotEntry]) -> SnapshotDiff {
    let base: HashMap<&str, &SnapshotEntry> =
        baseline.iter().map(|e| (e.text.as_str(), e)).collect();
    let mut diff = SnapshotDiff {
        total: current.len(),
        ..SnapshotDiff::default()
    };

    for entry in current {
        let Some(old) = base.get(entry.text.as_str()) else {
            diff.new.push(entry.text.clone());
            continue;
        };
        let before = diff.changed.len();
        for (script, now) in &entry.outputs {
            let was = old.outputs.get(script).map(String::as_str).unwrap_or("(none)");
            if was != now {
                diff.changed.push(ChangedOutput {
                    text: entry.text.clone(),
                    script: script.clone(),
                    was: was.to_string(),
                    now: now.clone(),
                });
            }
        }
        if diff.changed.len() == before {
            diff.same += 1;
        }
    }

    let seen: HashSet<&str> = current.iter().map(|e| e.text.as_str()).collect();
    diff.removed = baseline
        .iter()
        .filter(|e| !seen.contains(e.text.as_str()))
        .map(|e| e.text.clone())
        .collect();
    diff
}

pub fn diff_snapshot_cmd(from: &str, input_file: &str, baseline_file: &str) {
    let source = parse_script(from);
    let lines = read_lines(input_file);
    let conv = load_converter();

    let content = die!(
        fs::read_to_string(baseline_file),
        "Failed to read baseline file {baseline_file}: {}"
    );
    let baseline = die!(parse_snapshot(&content), "Failed to parse baseline JSONL: {}");
    let current: Vec<SnapshotEntry> = lines
        .iter()
        .map(|text| die!(snapshot_entry(&conv, text, source), "Error: {}"))
        .collect();

    let diff = diff_snapshots(&baseline, &current);
    for c in &diff.changed {
        println!("  CHANGED: {} [{}] -> {} (was: {})", c.text, c.script, c.now, c.was);
    }
    for text in &diff.new {
        println!("  NEW:     {text}");
    }
    for text in &diff.removed {
        println!("  REMOVED: {text}");
    }

    println!();
    println!("=== Summary ===");
    println!("  Total:    {}", diff.total);
    println!("  Same:     {}", diff.same);
    println!("  Changed:  {}", diff.changed.len());
    println!("  New:      {}", diff.new.len());
    println!("  Removed:  {}", diff.removed.len());
    exit_failed(!diff.is_clean());
}

// ---------------------------------------------------------------------------
// Golden cases
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GoldenCorpus {
    #[serde(default)]
    pub case: Vec<GoldenCase>,
}

#[derive(Debug, Deserialize)]
pub struct GoldenCase {
    pub text: String,
    pub from: String,
    pub to: String,
    pub expected: String,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldenStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct GoldenResult {
    pub text: String,
    pub from: String,
    pub to: String,
    pub expected: String,
    pub actual: String,
    pub status: GoldenStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GoldenSummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct GoldenReport {
    pub results: Vec<GoldenResult>,
    pub summary: GoldenSummary,
}

pub fn run_golden(conv: &Converter, corpus_toml: &str) -> Result<GoldenReport, CheckError> {
    let corpus: GoldenCorpus = toml::from_str(corpus_toml)?;
    let mut results = Vec::with_capacity(corpus.case.len());

    for case in corpus.case {
        let from: ScriptTag = case.from.parse()?;
        let to: ScriptTag = case.to.parse()?;
        let (actual, status) = if case.skip {
            (String::new(), GoldenStatus::Skip)
        } else {
            let actual = conv.convert(&case.text, from, to)?;
            let status = if actual == case.expected {
                GoldenStatus::Pass
            } else {
                GoldenStatus::Fail
            };
            (actual, status)
        };
        results.push(GoldenResult {
            text: case.text,
            from: from.name().to_string(),
            to: to.name().to_string(),
            expected: case.expected,
            actual,
            status,
            note: case.note,
        });
    }

    let count = |s: GoldenStatus| results.iter().filter(|r| r.status == s).count();
    let (pass, fail, skip) = (
        count(GoldenStatus::Pass),
        count(GoldenStatus::Fail),
        count(GoldenStatus::Skip),
    );
    let tested = pass + fail;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    let summary = GoldenSummary {
        total: results.len(),
        pass,
        fail,
        skip,
        pass_rate: format!("{rate:.1}%"),
    };
    Ok(GoldenReport { results, summary })
}

pub fn golden_cmd(corpus_file: &str, json: bool, verbose: bool) {
    let content = die!(
        fs::read_to_string(corpus_file),
        "Failed to read corpus {corpus_file}: {}"
    );
    let conv = load_converter();
    let report = die!(run_golden(&conv, &content), "Error: {}");

    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "JSON serialization failed: {}")
        );
    } else {
        let mut grouped: BTreeMap<(&str, &str), Vec<&GoldenResult>> = BTreeMap::new();
        for r in &report.results {
            grouped.entry((r.from.as_str(), r.to.as_str())).or_default().push(r);
        }
        for ((from, to), group) in &grouped {
            println!("\n=== {from} \u{2192} {to} ({} cases) ===", group.len());
            for r in group {
                match r.status {
                    GoldenStatus::Pass if verbose => {
                        println!("  \u{2713} {} \u{2192} {}", r.text, r.expected)
                    }
                    GoldenStatus::Pass => {}
                    GoldenStatus::Fail => println!(
                        "  \u{2717} {} \u{2192} {} (got: {})",
                        r.text, r.expected, r.actual
                    ),
                    GoldenStatus::Skip => {
                        let reason = r.note.as_deref().unwrap_or("known failure");
                        println!("  - {} [skip: {reason}]", r.text);
                    }
                }
            }
        }

        let s = &report.summary;
        println!();
        println!("=== Summary ===");
        println!("  Total:     {}", s.total);
        println!("  Pass:      {:>3}", s.pass);
        println!("  Fail:      {:>3}", s.fail);
        println!("  Skip:      {:>3}", s.skip);
        println!("  Pass rate: {} ({}/{})", s.pass_rate, s.pass, s.pass + s.fail);
    }
    exit_failed(report.summary.fail > 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn corpus_roundtrips_everywhere() {
        let conv = Converter::new();
        let text = lines(&[
            "namo tassa bhagavato arahato samm\u{101}sambuddhassa",
            "Eva\u{1E43} me suta\u{1E43}",
            "bhikkhave, sa\u{1E45}gho.",
        ]);
        let failures =
            roundtrip_failures(&conv, &text, ScriptTag::Latin, &ScriptTag::ALL).unwrap();
        assert!(failures.is_empty(), "{failures:?}");
    }

    #[test]
    fn roundtrip_compares_text_not_units() {
        let conv = Converter::new();
        let text = lines(&["\u{0915}."]);
        let via_hub =
            roundtrip_failures(&conv, &text, ScriptTag::Devanagari, &[ScriptTag::Hub]).unwrap();
        assert!(via_hub.is_empty(), "{via_hub:?}");

        let via_latin =
            roundtrip_failures(&conv, &text, ScriptTag::Devanagari, &[ScriptTag::Latin])
                .unwrap();
        assert_eq!(
            via_latin,
            vec![RoundtripFailure {
                text: "\u{0915}.".into(),
                via: ScriptTag::Latin,
                intermediate: "ka.".into(),
                back: "\u{0915}\u{0964}".into(),
            }]
        );
    }

    #[test]
    fn snapshot_covers_other_scripts() {
        let conv = Converter::new();
        let entry = snapshot_entry(&conv, "sa\u{1E45}gha", ScriptTag::Latin).unwrap();
        assert_eq!(entry.outputs.len(), ScriptTag::COUNT - 1);
        assert!(!entry.outputs.contains_key("latin"));
        assert_eq!(entry.outputs["devanagari"], "\u{0938}\u{0919}\u{094D}\u{0918}");
    }

    #[test]
    fn snapshot_file_diff() {
        let conv = Converter::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baseline.jsonl");

        let baseline: Vec<SnapshotEntry> = ["buddho", "dhammo"]
            .iter()
            .map(|t| snapshot_entry(&conv, t, ScriptTag::Latin).unwrap())
            .collect();
        let jsonl: String = baseline
            .iter()
            .map(|e| serde_json::to_string(e).unwrap() + "\n")
            .collect();
        fs::write(&path, jsonl).unwrap();
        let parsed = parse_snapshot(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, baseline);

        let mut current = vec![
            snapshot_entry(&conv, "buddho", ScriptTag::Latin).unwrap(),
            snapshot_entry(&conv, "sa\u{1E45}gho", ScriptTag::Latin).unwrap(),
        ];
        current[0].outputs.insert("thai".into(), "x".into());

        let diff = diff_snapshots(&parsed, &current);
        assert_eq!(diff.total, 2);
        assert_eq!(diff.same, 0);
        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].script, "thai");
        assert_eq!(diff.changed[0].now, "x");
        assert_eq!(diff.new, vec!["sa\u{1E45}gho"]);
        assert_eq!(diff.removed, vec!["dhammo"]);
        assert!(!diff.is_clean());
    }

    #[test]
    fn identical_snapshots_are_clean() {
        let conv = Converter::new();
        let entries = vec![snapshot_entry(&conv, "buddho", ScriptTag::Latin).unwrap()];
        let diff = diff_snapshots(&entries, &entries);
        assert_eq!(diff.same, 1);
        assert!(diff.is_clean());
    }

    #[test]
    fn golden_pass_fail_skip() {
        let corpus = r#"
[[case]]
text = "saṅgha"
from = "latin"
to = "deva"
expected = "सङ्घ"

[[case]]
text = "saṅgha"
from = "latin"
to = "thai"
expected = "wrong"

[[case]]
text = "x"
from = "latin"
to = "khmer"
expected = ""
skip = true
note = "placeholder"
"#;
        let report = run_golden(&Converter::new(), corpus).unwrap();
        let s = &report.summary;
        assert_eq!((s.total, s.pass, s.fail, s.skip), (3, 1, 1, 1));
        assert_eq!(s.pass_rate, "50.0%");
        assert_eq!(report.results[1].actual, "\u{0E2A}\u{0E07}\u{0E3A}\u{0E06}");
        assert_eq!(report.results[0].to, "devanagari");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][2]["status"], "skip");
    }

    #[test]
    fn golden_unknown_script() {
        let corpus = "[[case]]\ntext = \"a\"\nfrom = \"latin\"\nto = \"klingon\"\nexpected = \"\"\n";
        let err = run_golden(&Converter::new(), corpus).unwrap_err();
        assert!(matches!(err, CheckError::Script(_)));
    }
}
