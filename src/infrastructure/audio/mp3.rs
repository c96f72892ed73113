use mp3lame_encoder::{Bitrate, Builder, Encoder, FlushNoGap, MonoPcm, Quality};

/// Single-pass MP3 export of the finished track at a fixed 128 kbit/s.
///
/// Constructing the exporter probes the LAME encoder, so a missing or broken
/// encoding capability surfaces before any synthesis work is spent.
pub struct Mp3Exporter {
    sample_rate: u32,
}

impl Mp3Exporter {
    pub fn new(sample_rate: u32) -> Result<Self, String> {
        // Probe: build and drop an encoder to verify the capability exists
        // for this sample rate
        build_encoder(sample_rate)?;
        Ok(Self { sample_rate })
    }

    /// Encode the whole track. An empty track still exports as a minimal
    /// valid stream.
    pub fn export(&self, samples: &[f32]) -> Result<Vec<u8>, String> {
        let mut encoder = build_encoder(self.sample_rate)?;

        let pcm: Vec<i16> = samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .collect();

        let mut mp3_out: Vec<u8> =
            Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.len()));
        let encoded = encoder
            .encode(MonoPcm(&pcm), mp3_out.spare_capacity_mut())
            .map_err(|e| format!("MP3 encode failed: {:?}", e))?;
        // Safety: the encoder wrote exactly `encoded` bytes into the spare
        // capacity it was handed
        unsafe {
            mp3_out.set_len(mp3_out.len() + encoded);
        }

        mp3_out.reserve(7200);
        let flushed = encoder
            .flush::<FlushNoGap>(mp3_out.spare_capacity_mut())
            .map_err(|e| format!("MP3 flush failed: {:?}", e))?;
        unsafe {
            mp3_out.set_len(mp3_out.len() + flushed);
        }

        tracing::debug!(
            samples = samples.len(),
            sample_rate = self.sample_rate,
            mp3_bytes = mp3_out.len(),
            "Track encoded"
        );

        Ok(mp3_out)
    }
}

fn build_encoder(sample_rate: u32) -> Result<Encoder, String> {
    let mut builder =
        Builder::new().ok_or_else(|| "LAME encoder is unavailable".to_string())?;
    builder
        .set_num_channels(1)
        .map_err(|e| format!("encoder rejected channel count: {:?}", e))?;
    builder
        .set_sample_rate(sample_rate)
        .map_err(|e| format!("encoder rejected sample rate {}: {:?}", sample_rate, e))?;
    builder
        .set_brate(Bitrate::Kbps128)
        .map_err(|e| format!("encoder rejected bitrate: {:?}", e))?;
    builder
        .set_quality(Quality::Good)
        .map_err(|e| format!("encoder rejected quality: {:?}", e))?;
    builder
        .build()
        .map_err(|e| format!("failed to initialize MP3 encoder: {:?}", e))
}
