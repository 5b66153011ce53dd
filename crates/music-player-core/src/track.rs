use std::fmt;

/// Opaque handle to media bytes. In the browser this is a blob object URL
/// that must be revoked once the track leaves the playlist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "mov", "ogv", "mkv"];

impl TrackKind {
    /// Classify a selected file. The MIME type wins when the browser
    /// reports one; otherwise fall back to the file extension.
    pub fn detect(mime: &str, file_name: &str) -> Self {
        let mime = mime.trim();
        if !mime.is_empty() {
            return if mime.to_ascii_lowercase().starts_with("video/") {
                TrackKind::Video
            } else {
                TrackKind::Audio
            };
        }

        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            TrackKind::Video
        } else {
            TrackKind::Audio
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub locator: Locator,
    pub display_name: String,
    pub kind: TrackKind,
}

impl Track {
    pub fn new(locator: Locator, display_name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            locator,
            display_name: display_name.into(),
            kind,
        }
    }

    pub fn audio(locator: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(Locator::new(locator), display_name, TrackKind::Audio)
    }

    pub fn video(locator: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(Locator::new(locator), display_name, TrackKind::Video)
    }

    pub fn is_video(&self) -> bool {
        self.kind == TrackKind::Video
    }
}
