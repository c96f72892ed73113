pub mod language;

pub use language::{build_detector, detect_language, LanguageCode};
