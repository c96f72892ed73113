//! Turns a word list (rows of source word + translations) into a single
//! concatenated speech MP3: per-cell synthesis through a pluggable TTS
//! provider, a configurable pause before every primary-language clip except
//! the first, and a single-pass 128 kbit/s export.

pub mod domain;
pub mod error;
pub mod infrastructure;
