use super::clip::AudioClip;
use super::resample::resample_mono;

/// The single running accumulator a build appends into. Starts as
/// zero-duration silence and exclusively owns every sample appended to it.
#[derive(Debug)]
pub struct PcmTrack {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl PcmTrack {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Append silence of the given duration
    pub fn append_silence_ms(&mut self, ms: u64) {
        let count = (self.sample_rate as u64 * ms / 1000) as usize;
        self.samples.extend(std::iter::repeat(0.0f32).take(count));
    }

    /// Append a clip, converting its rate to the track's when they differ.
    /// The clip is consumed; the track owns its audio from here on.
    pub fn append_clip(&mut self, clip: AudioClip) -> Result<(), String> {
        if clip.sample_rate == self.sample_rate {
            self.samples.extend(clip.samples);
        } else {
            let converted = resample_mono(&clip.samples, clip.sample_rate, self.sample_rate)?;
            self.samples.extend(converted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(value: f32, count: usize, rate: u32) -> AudioClip {
        AudioClip {
            samples: vec![value; count],
            sample_rate: rate,
        }
    }

    #[test]
    fn test_new_track_is_zero_duration() {
        let track = PcmTrack::new(24_000);
        assert!(track.is_empty());
        assert_eq!(track.duration_ms(), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut track = PcmTrack::new(24_000);
        track.append_clip(clip(0.1, 3, 24_000)).unwrap();
        track.append_clip(clip(0.2, 2, 24_000)).unwrap();
        assert_eq!(track.samples(), &[0.1, 0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_silence_sits_exactly_between_clips() {
        let mut track = PcmTrack::new(24_000);
        track.append_clip(clip(0.5, 2400, 24_000)).unwrap();
        track.append_silence_ms(500);
        track.append_clip(clip(0.5, 2400, 24_000)).unwrap();

        // 100ms clip, 500ms gap, 100ms clip
        assert_eq!(track.duration_ms(), 700);
        let gap = &track.samples()[2400..2400 + 12_000];
        assert!(gap.iter().all(|&s| s == 0.0));
        assert_eq!(track.samples()[2399], 0.5);
        assert_eq!(track.samples()[2400 + 12_000], 0.5);
    }

    #[test]
    fn test_zero_length_silence_is_noop() {
        let mut track = PcmTrack::new(24_000);
        track.append_silence_ms(0);
        assert!(track.is_empty());
    }

    #[test]
    fn test_append_resamples_mismatched_clip() {
        let mut track = PcmTrack::new(24_000);
        track.append_clip(clip(0.3, 4800, 48_000)).unwrap();
        // 100ms at 48kHz lands as 100ms at 24kHz
        assert_eq!(track.samples().len(), 2400);
        assert_eq!(track.duration_ms(), 100);
    }

    #[test]
    fn test_duration_math() {
        let mut track = PcmTrack::new(24_000);
        track.append_silence_ms(1250);
        assert_eq!(track.samples().len(), 30_000);
        assert_eq!(track.duration_ms(), 1250);
    }
}
