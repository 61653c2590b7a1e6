use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use tracing::warn;
use tzf_rs::DefaultFinder;

use super::TimezoneFinder;

/// Offline coordinates-to-timezone lookup backed by the embedded tzf data
/// set. Construction parses that data set once; keep one instance around.
pub struct TzfTimezoneFinder {
    finder: DefaultFinder,
}

impl TzfTimezoneFinder {
    pub fn new() -> Self {
        Self { finder: DefaultFinder::new() }
    }
}

impl Default for TzfTimezoneFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TzfTimezoneFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TzfTimezoneFinder").finish_non_exhaustive()
    }
}

impl TimezoneFinder for TzfTimezoneFinder {
    fn find(&self, latitude: f64, longitude: f64) -> Option<Tz> {
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            warn!(latitude, longitude, "no timezone found for coordinates");
            return None;
        }

        match Tz::from_str(name) {
            Ok(tz) => Some(tz),
            Err(_) => {
                warn!(name, "unparseable timezone identifier");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_zone_for_well_known_coordinates() {
        let finder = TzfTimezoneFinder::new();
        // Central Stockholm.
        assert_eq!(finder.find(59.3293, 18.0686), Some(chrono_tz::Europe::Stockholm));
        // Central London.
        assert_eq!(finder.find(51.5074, -0.1278), Some(chrono_tz::Europe::London));
    }
}
