use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// TTS output format: 24 kHz mono signed 16-bit PCM.
pub const SAMPLE_RATE: u32 = 24_000;
pub const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Single-slot read-aloud controller: at most one narration is active.
///
/// Requesting the text that is already active toggles it off. Requesting
/// different text supersedes the current one. Each request gets a fresh
/// handle so a stale completion callback can never clear a narration that
/// replaced it.
#[derive(Debug, Clone, Default)]
pub struct NarrationController {
    active: Option<ActiveNarration>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
struct ActiveNarration {
    id: Uuid,
    text: String,
}

/// Outcome of a play request, decided before any audio is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginOutcome {
    /// Same text was already active: playback stops, nothing to generate.
    ToggledOff,
    /// Generation should proceed under this handle.
    Load(Uuid),
}

impl NarrationController {
    pub fn begin(&mut self, text: &str) -> BeginOutcome {
        if self
            .active
            .as_ref()
            .is_some_and(|a| a.text == text)
        {
            self.stop();
            return BeginOutcome::ToggledOff;
        }
        // Different text: drop whatever was playing, then load the new one.
        self.stop();
        let id = Uuid::new_v4();
        self.active = Some(ActiveNarration {
            id,
            text: text.to_string(),
        });
        self.loading = true;
        BeginOutcome::Load(id)
    }

    /// Called once synthesized audio is ready to play. Returns false when
    /// the handle was superseded or stopped while the audio was generating.
    pub fn playback_started(&mut self, id: Uuid) -> bool {
        if self.active.as_ref().is_some_and(|a| a.id == id) {
            self.loading = false;
            true
        } else {
            false
        }
    }

    /// Natural end-of-playback callback. Only clears the active marker when
    /// the ending handle is still the current one.
    pub fn finished(&mut self, id: Uuid) {
        if self.active.as_ref().is_some_and(|a| a.id == id) {
            self.active = None;
            self.loading = false;
        }
    }

    pub fn stop(&mut self) {
        self.active = None;
        self.loading = false;
    }

    pub fn speaking_text(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.text.as_str())
    }
}

/// Wraps raw PCM in a RIFF/WAVE header so clients can play it directly.
pub fn wav_from_pcm(pcm: &[u8], sample_rate: u32, channels: u16) -> Bytes {
    let byte_rate = sample_rate * channels as u32 * (BITS_PER_SAMPLE / 8) as u32;
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let data_len = pcm.len() as u32;

    let mut buf = BytesMut::with_capacity(44 + pcm.len());
    buf.put_slice(b"RIFF");
    buf.put_u32_le(36 + data_len);
    buf.put_slice(b"WAVE");
    buf.put_slice(b"fmt ");
    buf.put_u32_le(16);
    buf.put_u16_le(1); // PCM
    buf.put_u16_le(channels);
    buf.put_u32_le(sample_rate);
    buf.put_u32_le(byte_rate);
    buf.put_u16_le(block_align);
    buf.put_u16_le(BITS_PER_SAMPLE);
    buf.put_slice(b"data");
    buf.put_u32_le(data_len);
    buf.put_slice(pcm);
    buf.freeze()
}
