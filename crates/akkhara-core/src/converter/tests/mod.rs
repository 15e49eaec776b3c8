mod edge;
mod wildcard;

use super::*;
use crate::hub;

/// Pali lines covering every symbol, common clusters and punctuation.
pub(super) const CORPUS: &[&str] = &[
    "buddho",
    "dhammo",
    "sa\u{1E45}gho",
    "bhikkhave",
    "eva\u{1E43} me suta\u{1E43}",
    "eka\u{1E43} samaya\u{1E43} bhagav\u{101} s\u{101}vatthiya\u{1E43} viharati",
    "jetavane an\u{101}thapi\u{1E47}\u{1E0D}ikassa \u{101}r\u{101}me.",
    "tatra kho bhagav\u{101} bhikkh\u{16B} \u{101}mantesi",
    "namo tassa bhagavato arahato samm\u{101}sambuddhassa",
    "pa\u{1E6D}iccasamupp\u{101}do",
    "citta\u{1E43}",
    "\u{F1}\u{101}\u{1E47}a\u{1E43}",
    "ariyo a\u{1E6D}\u{1E6D}ha\u{1E45}giko maggo",
    "dukkha\u{1E43} ariyasacca\u{1E43}",
    "nibb\u{101}na\u{1E43} parama\u{1E43} sukha\u{1E43}",
    "iddhip\u{101}da",
    "ujjh\u{101}yati",
    "u\u{1E37}\u{101}ra",
    "g\u{101}ma\u{1E47}\u{12B}",
    "s\u{12B}la\u{1E43} sam\u{101}dhi pa\u{F1}\u{F1}\u{101}",
    "ta\u{1E47}h\u{101}",
    "jh\u{101}na chanda ghosa",
    "\u{1E6D}h\u{101}na \u{1E0D}a\u{1E43}sa da\u{1E37}ha",
    "yath\u{101}bh\u{16B}ta\u{1E43}",
    "sabbe sa\u{1E45}kh\u{101}r\u{101} anicc\u{101}",
    "tve o\u{1E6D}\u{1E6D}ha",
    "\u{101}yasm\u{101} \u{101}nando up\u{101}li",
    "\u{16B}mi ida\u{1E43} eso icch\u{101}",
    "jivh\u{101} mayha\u{1E43} brahm\u{101} ka\u{1E47}ha",
    "r\u{16B}pa\u{1E43} vedan\u{101} sa\u{F1}\u{F1}\u{101} vi\u{F1}\u{F1}\u{101}\u{1E47}a\u{1E43}",
    "pa\u{F1}ca ga\u{1E45}g\u{101} kacc\u{101}na",
    "ov\u{101}da udaka abhidhamma",
    "1. 2. dve catasso",
];

fn converter() -> Converter {
    Converter::new().with_wildcards(['*', '?'])
}
