pub mod error;
pub mod model;
pub mod service;

pub use error::TrackBuildError;
pub use model::{SpeechRow, SynthesisWarning, TrackBuildResult, TrackRequest};
pub use service::TrackService;
