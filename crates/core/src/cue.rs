//! Audio cue synthesis - maps game cues to short tone sequences.
//!
//! Stateless: the front end decides what to do with the tones (the terminal
//! runner can only ring the bell, a richer front end can play them).

use arrayvec::ArrayVec;

use crate::types::{Cue, Tone, Waveform};

/// C major arpeggio played on a perfect placement.
pub const PERFECT_ARPEGGIO_HZ: [f32; 4] = [523.0, 659.0, 784.0, 1047.0];

const PERFECT_NOTE_MS: u32 = 150;
const PERFECT_NOTE_GAP_MS: u32 = 50;
const PLACE_TONE_MS: u32 = 100;
const FALL_TONE_HZ: f32 = 200.0;
const FALL_TONE_MS: u32 = 200;

/// Lowest pitch of the place cue; `place_freq` adds up to 100 Hz of jitter.
pub const PLACE_BASE_HZ: f32 = 300.0;

/// Place-cue pitch for a jitter value in `[0, 1)`.
pub fn place_freq(jitter: f32) -> f32 {
    PLACE_BASE_HZ + jitter.clamp(0.0, 1.0) * 100.0
}

/// Tones making up `cue`, in start order.
pub fn tones(cue: Cue) -> ArrayVec<Tone, 4> {
    let mut out = ArrayVec::new();
    match cue {
        Cue::Perfect => {
            for (i, &freq_hz) in PERFECT_ARPEGGIO_HZ.iter().enumerate() {
                out.push(Tone {
                    freq_hz,
                    waveform: Waveform::Sine,
                    duration_ms: PERFECT_NOTE_MS,
                    delay_ms: i as u32 * PERFECT_NOTE_GAP_MS,
                });
            }
        }
        Cue::Place { freq_hz } => out.push(Tone {
            freq_hz,
            waveform: Waveform::Sine,
            duration_ms: PLACE_TONE_MS,
            delay_ms: 0,
        }),
        Cue::Fall => out.push(Tone {
            freq_hz: FALL_TONE_HZ,
            waveform: Waveform::Sawtooth,
            duration_ms: FALL_TONE_MS,
            delay_ms: 0,
        }),
    }
    out
}

/// Total length of a cue from first onset to last release.
pub fn cue_duration_ms(cue: Cue) -> u32 {
    tones(cue)
        .iter()
        .map(|t| t.delay_ms + t.duration_ms)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_is_a_staggered_arpeggio() {
        let t = tones(Cue::Perfect);
        assert_eq!(t.len(), 4);
        assert_eq!(t[0].freq_hz, 523.0);
        assert_eq!(t[3].freq_hz, 1047.0);
        assert_eq!(t[3].delay_ms, 150);
        assert!(t.iter().all(|t| t.waveform == Waveform::Sine));
        assert_eq!(cue_duration_ms(Cue::Perfect), 300);
    }

    #[test]
    fn fall_is_a_low_sawtooth() {
        let t = tones(Cue::Fall);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].waveform, Waveform::Sawtooth);
        assert_eq!(t[0].freq_hz, 200.0);
        assert_eq!(t[0].duration_ms, 200);
    }

    #[test]
    fn place_pitch_stays_in_band() {
        assert_eq!(place_freq(0.0), 300.0);
        assert_eq!(place_freq(0.5), 350.0);
        assert_eq!(place_freq(7.0), 400.0);
        let t = tones(Cue::Place { freq_hz: 333.0 });
        assert_eq!(t[0].freq_hz, 333.0);
        assert_eq!(t[0].duration_ms, 100);
    }
}
