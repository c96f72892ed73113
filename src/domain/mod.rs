pub mod track;
pub mod tts;
