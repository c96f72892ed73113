use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::io::MediaSourceStream;

/// A decoded per-cell clip: mono f32 samples. Clips are transient — each one
/// is created, appended into the running track, and dropped.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

fn conv<T>(samples: &mut Vec<f32>, data: std::borrow::Cow<symphonia::core::audio::AudioBuffer<T>>)
where
    T: symphonia::core::sample::Sample,
    f32: symphonia::core::conv::FromSample<T>,
{
    samples.extend(data.chan(0).iter().map(|v| f32::from_sample(*v)))
}

/// Decode intermediate audio bytes (the MP3/WAV container a TTS provider
/// returns) into a mono clip. Errors are plain strings; the caller treats
/// them as per-cell failures, not fatal ones.
pub fn decode_clip(bytes: &[u8]) -> Result<AudioClip, String> {
    let cursor = std::io::Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let hint = symphonia::core::probe::Hint::new();
    let meta_opts: symphonia::core::meta::MetadataOptions = Default::default();
    let fmt_opts: symphonia::core::formats::FormatOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| format!("unrecognized audio container: {}", e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| "no decodable audio track in clip".to_string())?;

    let dec_opts: DecoderOptions = Default::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .map_err(|e| format!("unsupported codec: {}", e))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| "clip is missing a sample rate".to_string())?;

    let mut samples = Vec::new();
    while let Ok(packet) = format.next_packet() {
        if packet.track_id() != track_id {
            continue;
        }
        let decoded = decoder
            .decode(&packet)
            .map_err(|e| format!("clip decode failed: {}", e))?;
        match decoded {
            AudioBufferRef::F32(buf) => samples.extend(buf.chan(0)),
            AudioBufferRef::U8(data) => conv(&mut samples, data),
            AudioBufferRef::U16(data) => conv(&mut samples, data),
            AudioBufferRef::U24(data) => conv(&mut samples, data),
            AudioBufferRef::U32(data) => conv(&mut samples, data),
            AudioBufferRef::S8(data) => conv(&mut samples, data),
            AudioBufferRef::S16(data) => conv(&mut samples, data),
            AudioBufferRef::S24(data) => conv(&mut samples, data),
            AudioBufferRef::S32(data) => conv(&mut samples, data),
            AudioBufferRef::F64(data) => conv(&mut samples, data),
        }
    }

    if samples.is_empty() {
        return Err("clip decoded to zero samples".to_string());
    }

    Ok(AudioClip {
        samples,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(sample_count: usize, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..sample_count {
                writer.write_sample(((i % 100) as i16 - 50) * 200).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_wav_clip() {
        let bytes = wav_bytes(2400, 24_000);
        let clip = decode_clip(&bytes).unwrap();
        assert_eq!(clip.sample_rate, 24_000);
        assert_eq!(clip.samples.len(), 2400);
        assert_eq!(clip.duration_ms(), 100);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_clip(b"this is not audio at all").unwrap_err();
        assert!(err.contains("unrecognized"), "unexpected error: {err}");
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(decode_clip(&[]).is_err());
    }
}
