use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use akkhara_cli::commands::{check_ops, config_ops, convert_ops, report_ops};
use akkhara_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "akkhara", about = "Pali transliteration across scripts")]
struct Cli {
    /// Custom settings TOML (see settings-export)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Write JSON trace logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text between scripts
    Convert {
        /// Source script name or ISO code, or "any" to detect per run
        from: String,
        /// Target script
        to: String,
        /// Text to convert (default: --file or stdin)
        text: Option<String>,
        /// Read input from a file
        #[arg(long)]
        file: Option<String>,
        /// Keep wildcard characters verbatim (search patterns)
        #[arg(long)]
        wildcards: bool,
    },
    /// Dump the hub units of decoded text
    Hub {
        /// Source script, or "any"
        from: String,
        text: String,
        /// Also print the legacy single-byte form
        #[arg(long)]
        bytes: bool,
    },
    /// Print the dominant script of the text
    Detect { text: String },
    /// Build and validate script tables
    Tables {
        /// Only this script
        #[arg(long)]
        script: Option<String>,
    },
    /// Print the embedded table for a script
    TableExport { script: String },
    /// Validate a custom table TOML file
    TableValidate {
        script: String,
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Check that every line round trips through other scripts
    Roundtrip {
        from: String,
        /// Input file (one text per line)
        input_file: String,
        /// Scripts to round trip through (default: all)
        #[arg(long, num_args = 1..)]
        via: Vec<String>,
    },
    /// Convert lines into every script and record them as JSONL
    Snapshot {
        from: String,
        /// Input file (one text per line)
        input_file: String,
        /// Output JSONL file
        output_file: String,
    },
    /// Compare current conversions against a snapshot
    DiffSnapshot {
        from: String,
        /// Input file (one text per line)
        input_file: String,
        /// Baseline JSONL from `snapshot`
        baseline_file: String,
    },
    /// Run [[case]] entries from a golden TOML corpus
    Golden {
        corpus_file: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Also list passing cases
        #[arg(short, long)]
        verbose: bool,
    },
    /// Character frequency report against a script's repertoire
    Charfreq {
        script: String,
        input_file: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Only list anomalous characters
        #[arg(long)]
        anomalies: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_dir.as_deref());

    if let Some(path) = &cli.config {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        });
        if let Err(e) = akkhara_core::settings::init_custom(content) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    match cli.command {
        Command::Convert {
            from,
            to,
            text,
            file,
            wildcards,
        } => convert_ops::convert_cmd(&from, &to, text.as_deref(), file.as_deref(), wildcards),
        Command::Hub { from, text, bytes } => convert_ops::hub_cmd(&from, &text, bytes),
        Command::Detect { text } => convert_ops::detect_cmd(&text),
        Command::Tables { script } => config_ops::tables_cmd(script.as_deref()),
        Command::TableExport { script } => config_ops::table_export(&script),
        Command::TableValidate { script, file } => config_ops::table_validate(&script, &file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::Roundtrip {
            from,
            input_file,
            via,
        } => check_ops::roundtrip_cmd(&from, &input_file, &via),
        Command::Snapshot {
            from,
            input_file,
            output_file,
        } => check_ops::snapshot_cmd(&from, &input_file, &output_file),
        Command::DiffSnapshot {
            from,
            input_file,
            baseline_file,
        } => check_ops::diff_snapshot_cmd(&from, &input_file, &baseline_file),
        Command::Golden {
            corpus_file,
            json,
            verbose,
        } => check_ops::golden_cmd(&corpus_file, json, verbose),
        Command::Charfreq {
            script,
            input_file,
            json,
            anomalies,
        } => report_ops::charfreq_cmd(&script, &input_file, json, anomalies),
    }
}
