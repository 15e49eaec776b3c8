use std::fs;

use akkhara_core::codec::build_codec;
use akkhara_core::settings::{default_toml, parse_settings_toml};
use akkhara_core::table::embedded_source;
use akkhara_core::{Converter, ScriptTag, TableError};

use super::{exit_failed, load_converter, parse_script};

/// Build each table, returning its repertoire size or the build error.
pub fn table_status(
    conv: &Converter,
    scripts: &[ScriptTag],
) -> Vec<(ScriptTag, Result<usize, TableError>)> {
    scripts
        .iter()
        .map(|&script| (script, conv.codec(script).map(|c| c.repertoire().len())))
        .collect()
}

pub fn tables_cmd(script: Option<&str>) {
    let scripts: Vec<ScriptTag> = match script {
        Some(name) => vec![parse_script(name)],
        None => ScriptTag::ALL.to_vec(),
    };
    let conv = load_converter();
    let mut failed = 0usize;
    for (script, status) in table_status(&conv, &scripts) {
        match status {
            Ok(chars) => println!("  ok      {:<12} {:>4} chars", script.name(), chars),
            Err(e) => {
                failed += 1;
                println!("  FAILED  {:<12} {e}", script.name());
            }
        }
    }
    println!("{} tables, {} failed", scripts.len(), failed);
    exit_failed(failed > 0);
}

pub fn settings_export() {
    print!("{}", default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    let wildcards: String = s.wildcards().iter().collect();
    println!(
        "OK: patterns.wildcards={wildcards:?}, tables={}",
        s.table_overrides().count()
    );
}

pub fn table_export(script: &str) {
    let script = parse_script(script);
    match embedded_source(script) {
        Some(src) => print!("{src}"),
        None => {
            eprintln!("Error: {script} has no table file");
            std::process::exit(1);
        }
    }
}

pub fn table_validate(script: &str, file: &str) {
    let script = parse_script(script);
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let codec = die!(build_codec(script, &content), "Error: {}");
    println!("OK: {script}, {} chars", codec.repertoire().len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use akkhara_core::TableCache;

    #[test]
    fn every_embedded_table_builds() {
        let conv = Converter::new();
        for (script, status) in table_status(&conv, &ScriptTag::ALL) {
            assert!(status.is_ok(), "{script}: {status:?}");
        }
    }

    #[test]
    fn broken_override_is_reported() {
        let cache = TableCache::new().with_source(ScriptTag::Thai, "script = \"thai\"\n");
        let conv = Converter::with_cache(cache);
        let status = table_status(&conv, &[ScriptTag::Thai, ScriptTag::Latin]);
        assert!(status[0].1.is_err());
        assert!(status[1].1.is_ok());
    }

    #[test]
    fn exported_table_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("khmer.toml");
        fs::write(&path, embedded_source(ScriptTag::Khmer).unwrap()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(build_codec(ScriptTag::Khmer, &content).is_ok());
    }
}
