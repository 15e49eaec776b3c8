use std::sync::Arc;

use super::*;
use crate::hub::{HubToken, UPPER_MARK};
use crate::symbol::Symbol;
use crate::table::embedded_source;

#[test]
fn empty_input_for_every_pair() {
    let conv = converter();
    for a in ScriptTag::ALL {
        for b in ScriptTag::ALL {
            assert_eq!(conv.convert("", a, b).unwrap(), "", "{a} -> {b}");
        }
    }
}

#[test]
fn whitespace_and_digits_pass_through_every_pair() {
    let conv = converter();
    let text = " 0123456789\t\n  42 ";
    for a in ScriptTag::ALL {
        for b in ScriptTag::ALL {
            assert_eq!(conv.convert(text, a, b).unwrap(), text, "{a} -> {b}");
        }
    }
}

#[test]
fn same_script_is_untouched_and_lazy() {
    let conv = converter();
    let text = "not thai at all \u{E01}\u{E3A}";
    assert_eq!(conv.convert(text, ScriptTag::Thai, ScriptTag::Thai).unwrap(), text);
    assert!(!conv.cache().is_loaded(ScriptTag::Thai));
}

#[test]
fn unmappable_chars_are_literals() {
    let conv = converter();
    let out = conv
        .convert("xbuddho\u{1F600}!", ScriptTag::Latin, ScriptTag::Devanagari)
        .unwrap();
    assert_eq!(out, "x\u{92C}\u{941}\u{926}\u{94D}\u{927}\u{94B}\u{1F600}!");
    assert_eq!(
        conv.convert(&out, ScriptTag::Devanagari, ScriptTag::Latin).unwrap(),
        "xbuddho\u{1F600}!"
    );
}

#[test]
fn reserved_range_literals_survive_hub_text() {
    let conv = converter();
    let text = "\u{A9} buddho \u{81}";
    let hub = conv.convert(text, ScriptTag::Latin, ScriptTag::Hub).unwrap();
    assert!(hub.starts_with("\u{80}\u{A9}"));
    assert_eq!(conv.convert(&hub, ScriptTag::Hub, ScriptTag::Latin).unwrap(), text);
}

#[test]
fn latin_case_restored_only_from_cased_source() {
    let conv = converter();
    let hub = conv.convert("Buddho", ScriptTag::Latin, ScriptTag::Hub).unwrap();
    assert!(hub.starts_with(UPPER_MARK));
    assert_eq!(conv.convert(&hub, ScriptTag::Hub, ScriptTag::Latin).unwrap(), "Buddho");

    let deva = conv.convert("Buddho", ScriptTag::Latin, ScriptTag::Devanagari).unwrap();
    assert_eq!(
        conv.convert(&deva, ScriptTag::Devanagari, ScriptTag::Latin).unwrap(),
        "buddho"
    );
}

#[test]
fn latin_title_and_upper_aspirates() {
    let conv = converter();
    for text in ["Khandha", "KHANDHA", "Bhikkhave Saṅgho"] {
        let hub = conv.decode(text, ScriptTag::Latin).unwrap();
        assert_eq!(conv.encode(&hub, ScriptTag::Latin).unwrap(), text);
    }
}

#[test]
fn table_failure_is_isolated() {
    let cache = TableCache::new().with_source(ScriptTag::Thai, "script = \"thai\"\nmodel = \"abugida\"\n");
    let conv = Converter::with_cache(cache);

    let err = conv.convert("buddho", ScriptTag::Latin, ScriptTag::Thai).unwrap_err();
    assert!(matches!(err, TableError::MissingSymbol { script: ScriptTag::Thai, .. }));
    // The failure is remembered rather than rebuilt.
    assert_eq!(conv.codec(ScriptTag::Thai).err(), Some(err));

    assert!(conv.convert("buddho", ScriptTag::Latin, ScriptTag::Devanagari).is_ok());
    assert!(conv.convert("buddho", ScriptTag::Latin, ScriptTag::Khmer).is_ok());

    let failures = conv.cache().preload_all();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, ScriptTag::Thai);
}

#[test]
fn overridden_table_is_used() {
    let deva = embedded_source(ScriptTag::Devanagari).unwrap().replace("\\u0964", "|");
    let conv = Converter::with_cache(TableCache::new().with_source(ScriptTag::Devanagari, deva));
    assert_eq!(
        conv.convert("namo.", ScriptTag::Latin, ScriptTag::Devanagari).unwrap(),
        "\u{928}\u{92E}\u{94B}|"
    );
}

#[test]
fn every_table_builds() {
    let conv = converter();
    assert!(conv.cache().preload_all().is_empty());
    for script in ScriptTag::ALL {
        assert!(conv.cache().is_loaded(script));
        assert_eq!(conv.codec(script).unwrap().script(), script);
    }
}

#[test]
fn concurrent_first_use_builds_once() {
    let conv = converter();
    let codecs: Vec<Arc<dyn crate::codec::ScriptCodec>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| conv.codec(ScriptTag::Myanmar).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for codec in &codecs[1..] {
        assert!(Arc::ptr_eq(&codecs[0], codec));
    }
}

#[test]
fn converter_is_shareable_across_threads() {
    let conv = converter();
    std::thread::scope(|s| {
        for script in ScriptTag::native() {
            let conv = &conv;
            s.spawn(move || {
                for &line in CORPUS {
                    let native = conv.convert(line, ScriptTag::Latin, script).unwrap();
                    assert_eq!(conv.convert(&native, script, ScriptTag::Latin).unwrap(), line);
                }
            });
        }
    });
}

#[test]
fn decode_any_handles_mixed_scripts() {
    let conv = converter();
    let hub = conv.decode_any("namo \u{928}\u{92E}\u{94B}").unwrap();
    let latin = conv.encode(&hub, ScriptTag::Latin).unwrap();
    assert_eq!(latin, "namo namo");
    assert_eq!(
        conv.convert_any("\u{E19}\u{E42}\u{E21} *", ScriptTag::Latin).unwrap(),
        "namo *"
    );
    assert_eq!(conv.convert_any("12 ", ScriptTag::Thai).unwrap(), "12 ");
}

#[test]
fn decode_any_reads_hub_runs() {
    let conv = converter();
    let hub_text = conv.convert("dhammo", ScriptTag::Latin, ScriptTag::Hub).unwrap();
    let seq = conv.decode_any(&hub_text).unwrap();
    assert_eq!(seq.tokens()[0], HubToken::symbol(Symbol::Dh));
}

#[test]
fn detects_script_of_converted_text() {
    let conv = converter();
    for script in ScriptTag::ALL {
        let text = conv.convert("bhikkhave", ScriptTag::Latin, script).unwrap();
        assert_eq!(detect_script(&text), Some(script), "{text:?}");
    }
}
