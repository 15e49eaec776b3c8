//! Subcommand implementations for the `akkhara` binary.
//!
//! Each `*_cmd` function prints and exits on failure; the functions they
//! call return plain data so they can be tested without a process.

use std::fs;
use std::io::{self, Read};
use std::process;

use akkhara_core::settings::settings;
use akkhara_core::{Converter, ScriptTag, TableCache};
use tracing::info;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod check_ops;
pub mod config_ops;
pub mod convert_ops;
pub mod report_ops;

/// Parse a script argument or exit.
pub fn parse_script(name: &str) -> ScriptTag {
    die!(name.parse::<ScriptTag>(), "Error: {}")
}

/// Build a converter honouring the `[tables]` overrides in settings.
pub fn load_converter() -> Converter {
    let mut cache = TableCache::new();
    for (script, path) in settings().table_overrides() {
        let source = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {script} table {}: {e}", path.display());
            process::exit(1);
        });
        info!(%script, path = %path.display(), "table override");
        cache = cache.with_source(script, source);
    }
    Converter::with_cache(cache)
}

/// Lines of an input file, trimmed, skipping blanks and `#` comments.
pub fn read_lines(input_file: &str) -> Vec<String> {
    let content = die!(
        fs::read_to_string(input_file),
        "Failed to read input file {input_file}: {}"
    );
    parse_lines(&content)
}

pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Text from the argument, the file, or stdin, in that order.
pub fn read_input(text: Option<&str>, file: Option<&str>) -> String {
    if let Some(t) = text {
        return t.to_string();
    }
    if let Some(f) = file {
        return die!(fs::read_to_string(f), "Failed to read {f}: {}");
    }
    let mut buf = String::new();
    die!(io::stdin().read_to_string(&mut buf), "Failed to read stdin: {}");
    buf
}

pub(crate) fn exit_failed(failed: bool) {
    if failed {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_skips_comments_and_blanks() {
        let lines = parse_lines("# header\n\n  buddho \n#x\ndhammo\n");
        assert_eq!(lines, vec!["buddho", "dhammo"]);
    }

    #[test]
    fn read_input_prefers_text() {
        assert_eq!(read_input(Some("abc"), Some("/nonexistent")), "abc");
    }

    #[test]
    fn read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "sa\u{1E45}gho\n").unwrap();
        assert_eq!(read_input(None, path.to_str()), "sa\u{1E45}gho\n");
    }

    #[test]
    fn default_converter_has_no_overrides() {
        let conv = load_converter();
        assert!(conv.cache().preload_all().is_empty());
    }
}
