use crate::error::{PlayerError, Result};
use crate::track::Track;

/// Ordered list of tracks. Insertion order is playback order and the same
/// file may appear more than once.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Append to the end and return the slot the track landed in.
    pub fn append(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Remove the track at `index`, shifting later entries down by one.
    ///
    /// # Errors
    ///
    /// [`PlayerError::IndexOutOfRange`] when `index >= len()`; the list is
    /// left as it was.
    pub fn remove_at(&mut self, index: usize) -> Result<Track> {
        if index >= self.tracks.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(self.tracks.remove(index))
    }

    /// Empty the list, handing back the removed tracks so their locators can
    /// be released.
    pub fn clear(&mut self) -> Vec<Track> {
        std::mem::take(&mut self.tracks)
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(p: &Playlist) -> Vec<&str> {
        p.iter().map(|t| t.display_name.as_str()).collect()
    }

    #[test]
    fn append_assigns_sequential_slots() {
        let mut p = Playlist::new();
        assert_eq!(p.append(Track::audio("blob:a", "a.mp3")), 0);
        assert_eq!(p.append(Track::audio("blob:a", "a.mp3")), 1);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut p = Playlist::new();
        for n in ["a", "b", "c"] {
            p.append(Track::audio(format!("blob:{n}"), n));
        }
        let removed = p.remove_at(1).unwrap();
        assert_eq!(removed.display_name, "b");
        assert_eq!(names(&p), ["a", "c"]);
    }

    #[test]
    fn remove_out_of_range_leaves_list_alone() {
        let mut p = Playlist::new();
        p.append(Track::audio("blob:a", "a"));
        let err = p.remove_at(1).unwrap_err();
        assert!(matches!(err, PlayerError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn clear_returns_everything() {
        let mut p = Playlist::new();
        p.append(Track::audio("blob:a", "a"));
        p.append(Track::video("blob:b", "b"));
        let removed = p.clear();
        assert_eq!(removed.len(), 2);
        assert!(p.is_empty());
    }
}
