use rubato::{FftFixedIn, Resampler};

const CHUNK_SIZE: usize = 1024;

/// Convert a mono clip between sample rates with rubato's FFT resampler.
///
/// The input is fed in fixed-size chunks (the tail zero-padded), then zero
/// chunks keep flowing until the resampler's delay line has drained, so the
/// clip tail is not lost. The leading delay frames are skipped and the
/// output trimmed to the rate-proportional length so track duration math
/// stays exact.
pub fn resample_mono(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, String> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler =
        FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, CHUNK_SIZE, 2, 1)
            .map_err(|e| format!("resampler construction failed: {}", e))?;

    let expected = (samples.len() as u64 * to_rate as u64 / from_rate as u64) as usize;
    let delay = resampler.output_delay();
    let mut out = Vec::with_capacity(expected + delay + CHUNK_SIZE);
    let mut position = 0;

    while out.len() < expected + delay {
        let needed = resampler.input_frames_next();
        let mut frame = vec![0.0f32; needed];
        if position < samples.len() {
            let available = (samples.len() - position).min(needed);
            frame[..available].copy_from_slice(&samples[position..position + available]);
            position += needed;
        }

        let processed = resampler
            .process(&[frame], None)
            .map_err(|e| format!("resample failed: {}", e))?;
        out.extend_from_slice(&processed[0]);
    }

    out.drain(..delay);
    out.truncate(expected);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_noop_when_rates_match() {
        let samples = vec![0.25f32; 480];
        let out = resample_mono(&samples, 24_000, 24_000).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn test_resample_halves_length() {
        let samples: Vec<f32> = (0..4800).map(|i| (i as f32 * 0.01).sin()).collect();
        let out = resample_mono(&samples, 48_000, 24_000).unwrap();
        assert_eq!(out.len(), 2400);
    }

    #[test]
    fn test_resample_doubles_length() {
        let samples: Vec<f32> = (0..2400).map(|i| (i as f32 * 0.02).sin()).collect();
        let out = resample_mono(&samples, 24_000, 48_000).unwrap();
        assert_eq!(out.len(), 4800);
    }

    #[test]
    fn test_resample_empty_input() {
        let out = resample_mono(&[], 48_000, 24_000).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_resample_keeps_the_clip_tail() {
        // Unit impulse as the very last sample; if the delay line is not
        // drained, the end of the clip vanishes
        let mut samples = vec![0.0f32; 4800];
        samples[4799] = 1.0;
        let out = resample_mono(&samples, 48_000, 24_000).unwrap();

        assert_eq!(out.len(), 2400);
        let tail_peak = out[2300..]
            .iter()
            .fold(0.0f32, |peak, &s| peak.max(s.abs()));
        assert!(
            tail_peak > 0.1,
            "impulse at clip end was lost: tail peak = {}",
            tail_peak
        );
    }

    #[test]
    fn test_resample_aligns_output_with_input_start() {
        // Constant signal: with the leading delay skipped, both the head and
        // the body of the output carry the signal, not delay padding
        let samples = vec![1.0f32; 4800];
        let out = resample_mono(&samples, 48_000, 24_000).unwrap();

        assert_eq!(out.len(), 2400);
        assert!(
            out[100..150].iter().all(|&s| s > 0.8),
            "output head is delay padding"
        );
        assert!(
            out[2200..2300].iter().all(|&s| s > 0.8),
            "output tail was truncated away"
        );
    }
}
