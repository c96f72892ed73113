pub mod clip;
pub mod mp3;
pub mod resample;
pub mod track;

pub use clip::{decode_clip, AudioClip};
pub use mp3::Mp3Exporter;
pub use track::PcmTrack;
