//! Lossless Pali transliteration across fourteen scripts.
//!
//! Text is decoded into the IPE hub (one fixed code unit per Pali sound,
//! see [`hub`]) and re-encoded into the target script. Script knowledge
//! lives in embedded TOML tables that are validated when first used.

pub mod charfreq;
pub mod codec;
pub mod converter;
pub mod hub;
pub mod script;
pub mod settings;
pub mod symbol;
pub mod table;

pub use converter::{detect_script, Converter, TableCache};
pub use hub::{Case, HubSeq, HubToken, HubUnit};
pub use script::ScriptTag;
pub use symbol::Symbol;
pub use table::TableError;
