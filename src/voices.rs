/*!
 * Voice catalog utilities.
 *
 * The synthesis service exposes a large dynamic voice list; this tool keeps a
 * fixed catalog of the en-US standard and premium (WaveNet) voices so that a
 * selection can be validated offline before any network request is made.
 */

use anyhow::{anyhow, Result};

/// Voice preselected when the operator makes no choice
pub const DEFAULT_VOICE: &str = "en-US-Standard-F";

/// Pricing/quality tier of a catalog voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTier {
    /// Standard parametric voices
    Standard,
    /// Premium WaveNet voices (higher per-character cost)
    WaveNet,
}

/// A (language code, voice name) pair from the fixed catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    /// BCP-47 language code, e.g. "en-US"
    pub language_code: &'static str,
    /// Full voice identifier, e.g. "en-US-Wavenet-H"
    pub name: &'static str,
    /// Quality tier
    pub tier: VoiceTier,
}

/// The twenty en-US voices offered by the selection list
pub const VOICE_CATALOG: [VoiceSelection; 20] = [
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-A", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-B", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-C", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-D", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-E", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-F", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-G", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-H", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-I", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Standard-J", tier: VoiceTier::Standard },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-A", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-B", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-C", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-D", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-E", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-F", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-G", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-H", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-I", tier: VoiceTier::WaveNet },
    VoiceSelection { language_code: "en-US", name: "en-US-Wavenet-J", tier: VoiceTier::WaveNet },
];

/// Look up a catalog entry by its full voice name (case-insensitive)
pub fn find_voice(name: &str) -> Option<&'static VoiceSelection> {
    VOICE_CATALOG
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(name))
}

/// Resolve a voice name to a catalog entry, failing with the list of valid names
pub fn resolve_voice(name: &str) -> Result<&'static VoiceSelection> {
    find_voice(name).ok_or_else(|| {
        anyhow!(
            "Unknown voice '{}'. Available voices: {}",
            name,
            VOICE_CATALOG
                .iter()
                .map(|v| v.name)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

/// The catalog entry for the default voice
pub fn default_voice() -> &'static VoiceSelection {
    // The default is a catalog member by construction
    find_voice(DEFAULT_VOICE).unwrap()
}
