use std::fmt;

/// Container formats accepted for transcription, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    M4a,
    Mp3,
    Wav,
    Webm,
    Mp4,
    Ogg,
}

impl AudioFormat {
    /// Accepted unless configuration says otherwise.
    pub const DEFAULT_ALLOWED: [AudioFormat; 5] = [
        AudioFormat::M4a,
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Webm,
        AudioFormat::Mp4,
    ];

    /// Parses an extension with or without the leading dot, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "m4a" => Some(Self::M4a),
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "webm" => Some(Self::Webm),
            "mp4" => Some(Self::Mp4),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::M4a => ".m4a",
            Self::Mp3 => ".mp3",
            Self::Wav => ".wav",
            Self::Webm => ".webm",
            Self::Mp4 => ".mp4",
            Self::Ogg => ".ogg",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::M4a => "audio/mp4",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
            Self::Mp4 => "video/mp4",
            Self::Ogg => "audio/ogg",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
