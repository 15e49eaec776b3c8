use super::*;

fn wildcard_positions(s: &str) -> Vec<char> {
    s.chars().filter(|c| matches!(c, '*' | '?')).collect()
}

#[test]
fn wildcards_survive_every_pair() {
    let conv = converter();
    let pattern = "*bu?dh* sa\u{1E45}gh?";
    for a in ScriptTag::ALL {
        let in_a = conv
            .convert_preserving_wildcards(pattern, ScriptTag::Latin, a)
            .unwrap();
        assert_eq!(wildcard_positions(&in_a), wildcard_positions(pattern), "{a}");
        for b in ScriptTag::ALL {
            let in_b = conv.convert_preserving_wildcards(&in_a, a, b).unwrap();
            assert_eq!(wildcard_positions(&in_b), wildcard_positions(pattern), "{a} -> {b}");
            let back = conv.convert_preserving_wildcards(&in_b, b, ScriptTag::Latin).unwrap();
            assert_eq!(back, pattern, "{a} -> {b} -> latin");
        }
    }
}

#[test]
fn segments_convert_independently() {
    let conv = converter();
    let out = conv
        .convert_preserving_wildcards("dhamm*", ScriptTag::Latin, ScriptTag::Devanagari)
        .unwrap();
    assert_eq!(out, "\u{927}\u{92E}\u{94D}\u{92E}\u{94D}*");
}

#[test]
fn only_wildcards() {
    let conv = converter();
    for pattern in ["*", "??", "*?*"] {
        assert_eq!(
            conv.convert_preserving_wildcards(pattern, ScriptTag::Latin, ScriptTag::Thai)
                .unwrap(),
            pattern
        );
    }
    assert_eq!(
        conv.convert_preserving_wildcards("", ScriptTag::Latin, ScriptTag::Thai).unwrap(),
        ""
    );
}

#[test]
fn custom_wildcards() {
    let conv = Converter::new().with_wildcards(['%']);
    assert_eq!(conv.wildcards(), &['%']);
    let out = conv
        .convert_preserving_wildcards("ka%", ScriptTag::Latin, ScriptTag::Khmer)
        .unwrap();
    assert_eq!(out, "\u{1780}%");
}

#[test]
fn thai_prebase_sign_does_not_cross_wildcard() {
    let conv = converter();
    let out = conv
        .convert_preserving_wildcards("\u{E40}*\u{E01}", ScriptTag::Thai, ScriptTag::Latin)
        .unwrap();
    assert_eq!(out, "\u{E40}*ka");
}

#[test]
fn convert_any_keeps_wildcards() {
    let conv = Converter::new().with_wildcards(['.']);
    let out = conv.convert_any("ka.", ScriptTag::Devanagari).unwrap();
    assert_eq!(out, "\u{0915}.");
    assert_eq!(
        out,
        conv.convert_preserving_wildcards("ka.", ScriptTag::Latin, ScriptTag::Devanagari)
            .unwrap()
    );
    assert_eq!(conv.convert_any("\u{0915}.", ScriptTag::Myanmar).unwrap(), "\u{1000}.");
    assert_eq!(conv.convert_any(". *", ScriptTag::Khmer).unwrap(), ". *");
}
