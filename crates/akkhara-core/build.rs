use std::fs;

fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );

    let dir = "src/table/data";
    println!("cargo:rerun-if-changed={dir}");
    let mut entries: Vec<_> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {dir}: {e}"))
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|x| x == "toml"))
        .collect();
    entries.sort();
    for path in entries {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
        validate_toml(&path.display().to_string(), &content);
    }
}

fn validate_toml(path: &str, content: &str) {
    let value = match content.parse::<toml::Value>() {
        Ok(v) => v,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    if path.contains("table/data") && value.get("script").and_then(|s| s.as_str()).is_none() {
        panic!("{path} has no `script` key");
    }
}
