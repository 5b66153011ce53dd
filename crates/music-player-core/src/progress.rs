/// Playback position as reported by the media element's `timeupdate`.
///
/// Duration is `None` until metadata has loaded. The element reports `NaN`
/// or infinity before that, so only finite positive values are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress {
    current_time: f64,
    duration: Option<f64>,
}

impl Progress {
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn update(&mut self, current_time: f64, duration: f64) {
        if current_time.is_finite() {
            self.current_time = current_time.max(0.0);
        }
        self.set_duration(duration);
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = known_duration(duration);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `current / duration * 100`, or `None` while the duration is unknown.
    pub fn percent(&self) -> Option<f64> {
        self.duration.map(|d| self.current_time / d * 100.0)
    }

    /// Map a 0-100 slider value to an absolute position in seconds.
    pub fn seek_target(&self, percent: f64) -> Option<f64> {
        if !percent.is_finite() {
            return None;
        }
        self.duration.map(|d| percent.clamp(0.0, 100.0) / 100.0 * d)
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn total_label(&self) -> String {
        format_time(self.duration.unwrap_or(0.0))
    }
}

fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// `M:SS`, minutes unbounded and seconds zero-padded.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_examples() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(9.99), "0:09");
    }

    #[test]
    fn format_time_degenerate_input() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
    }

    #[test]
    fn percent_needs_known_duration() {
        let mut p = Progress::default();
        p.update(30.0, f64::NAN);
        assert_eq!(p.percent(), None);
        assert_eq!(p.elapsed_label(), "0:30");
        assert_eq!(p.total_label(), "0:00");

        p.update(30.0, 120.0);
        assert_eq!(p.percent(), Some(25.0));
        assert_eq!(p.total_label(), "2:00");
    }

    #[test]
    fn seek_maps_percent_onto_duration() {
        let mut p = Progress::default();
        assert_eq!(p.seek_target(50.0), None);

        p.set_duration(200.0);
        assert_eq!(p.seek_target(50.0), Some(100.0));
        assert_eq!(p.seek_target(150.0), Some(200.0));
        assert_eq!(p.seek_target(-1.0), Some(0.0));
        assert_eq!(p.seek_target(f64::NAN), None);
    }

    #[test]
    fn infinite_duration_is_unknown() {
        let mut p = Progress::default();
        p.set_duration(f64::INFINITY);
        assert_eq!(p.duration(), None);
    }
}
