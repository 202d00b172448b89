use crate::types::TimeOfDay;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Timelike, Utc};

/// Time of day and arc progress taken from one timestamp.
///
/// Fields are private and the only constructor lives in this module, so the
/// two halves always come from the same hour via [`sample_hour`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkySample {
    time_of_day: TimeOfDay,
    position: f64,
}

impl SkySample {
    fn new(time_of_day: TimeOfDay, position: f64) -> Self {
        Self {
            time_of_day,
            position,
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Progress across the visible arc, in `[0, 1)`.
    pub fn position(&self) -> f64 {
        self.position
    }
}

impl Default for SkySample {
    /// Midday, sun at its apex.
    fn default() -> Self {
        Self::new(TimeOfDay::Day, 0.5)
    }
}

/// Where the sampler gets "now" from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    System,
    /// Pin the local wall-clock time; the date still follows the system clock.
    Fixed(NaiveTime),
}

/// Snapshot of one clock reading: the sky state and the local time it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub sample: SkySample,
    pub local: DateTime<FixedOffset>,
}

/// Turns wall-clock time in a single reference zone into a [`SkySample`].
///
/// Both the sky and the textual clock read from the same offset, so they
/// can never drift apart.
#[derive(Debug, Clone, Copy)]
pub struct TimeSampler {
    offset: FixedOffset,
    source: TimeSource,
}

impl TimeSampler {
    pub fn new(offset: FixedOffset, source: TimeSource) -> Self {
        Self { offset, source }
    }

    pub fn read(&self) -> Reading {
        self.read_at(Utc::now())
    }

    pub fn read_at(&self, instant: DateTime<Utc>) -> Reading {
        let local = self.local_time(instant);
        Reading {
            sample: sample_hour(hour_of_day(&local)),
            local,
        }
    }

    fn local_time(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        let now = instant.with_timezone(&self.offset);
        match self.source {
            TimeSource::System => now,
            TimeSource::Fixed(time) => {
                let naive = now.date_naive().and_time(time);
                self.offset
                    .from_local_datetime(&naive)
                    .earliest()
                    .unwrap_or(now)
            }
        }
    }
}

/// Hour of day as a real number in `[0, 24)`, fractional by minutes.
pub fn hour_of_day<T: Timelike>(time: &T) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0
}

pub fn classify(hour: f64) -> TimeOfDay {
    let h = hour.rem_euclid(24.0);
    if (6.0..8.0).contains(&h) {
        TimeOfDay::Dawn
    } else if (8.0..17.0).contains(&h) {
        TimeOfDay::Day
    } else if (17.0..19.0).contains(&h) {
        TimeOfDay::Dusk
    } else {
        TimeOfDay::Night
    }
}

/// Progress across the current arc: 06:00-18:00 for the sun, 18:00-06:00 for the moon.
pub fn celestial_position(hour: f64) -> f64 {
    let h = hour.rem_euclid(24.0);
    let position = if (6.0..18.0).contains(&h) {
        (h - 6.0) / 12.0
    } else if h >= 18.0 {
        (h - 18.0) / 12.0
    } else {
        (h + 6.0) / 12.0
    };
    position.clamp(0.0, 1.0 - f64::EPSILON)
}

pub fn sample_hour(hour: f64) -> SkySample {
    SkySample::new(classify(hour), celestial_position(hour))
}

/// Parses `HH:MM` as given on the command line.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| format!("expected HH:MM, got {:?}: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn lima() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    #[test]
    fn classification_bands() {
        let cases = [
            (0.0, TimeOfDay::Night),
            (5.99, TimeOfDay::Night),
            (6.0, TimeOfDay::Dawn),
            (7.99, TimeOfDay::Dawn),
            (8.0, TimeOfDay::Day),
            (16.99, TimeOfDay::Day),
            (17.0, TimeOfDay::Dusk),
            (18.99, TimeOfDay::Dusk),
            (19.0, TimeOfDay::Night),
            (23.99, TimeOfDay::Night),
        ];
        for (hour, expected) in cases {
            assert_eq!(classify(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn every_minute_of_the_day_classifies_by_band() {
        for minute in 0..24 * 60 {
            let h = minute as f64 / 60.0;
            let expected = match h {
                h if (6.0..8.0).contains(&h) => TimeOfDay::Dawn,
                h if (8.0..17.0).contains(&h) => TimeOfDay::Day,
                h if (17.0..19.0).contains(&h) => TimeOfDay::Dusk,
                _ => TimeOfDay::Night,
            };
            assert_eq!(classify(h), expected);
            let p = celestial_position(h);
            assert!((0.0..1.0).contains(&p), "position {p} at {h}");
        }
    }

    #[test]
    fn position_restarts_at_six_and_eighteen() {
        assert!(celestial_position(6.0).abs() < EPS);
        assert!(celestial_position(18.0).abs() < EPS);
        // Both arcs approach 1 just before they hand over.
        assert!(celestial_position(17.99) > 0.99);
        assert!(celestial_position(5.99) > 0.99);
    }

    #[test]
    fn scenario_positions() {
        let cases = [
            (7.0, TimeOfDay::Dawn, 1.0 / 12.0),
            (12.5, TimeOfDay::Day, 6.5 / 12.0),
            (23.0, TimeOfDay::Night, 5.0 / 12.0),
            (2.0, TimeOfDay::Night, 8.0 / 12.0),
        ];
        for (hour, tod, position) in cases {
            let sample = sample_hour(hour);
            assert_eq!(sample.time_of_day(), tod);
            assert!((sample.position() - position).abs() < EPS, "hour {hour}");
        }
    }

    #[test]
    fn reads_in_reference_offset() {
        let sampler = TimeSampler::new(lima(), TimeSource::System);
        // 17:30 UTC is 12:30 in UTC-5.
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 17, 30, 45).unwrap();
        let reading = sampler.read_at(instant);
        assert_eq!(reading.local.hour(), 12);
        assert_eq!(reading.local.minute(), 30);
        assert_eq!(reading.sample.time_of_day(), TimeOfDay::Day);
        assert!((reading.sample.position() - 6.5 / 12.0).abs() < EPS);
    }

    #[test]
    fn wraps_past_utc_midnight() {
        let sampler = TimeSampler::new(lima(), TimeSource::System);
        // 03:00 UTC is 22:00 the previous day in UTC-5.
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap();
        let reading = sampler.read_at(instant);
        assert_eq!(reading.local.hour(), 22);
        assert_eq!(reading.sample.time_of_day(), TimeOfDay::Night);
    }

    #[test]
    fn fixed_source_pins_local_time() {
        let at = parse_clock_time("07:00").unwrap();
        let sampler = TimeSampler::new(lima(), TimeSource::Fixed(at));
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        let reading = sampler.read_at(instant);
        assert_eq!(reading.local.hour(), 7);
        assert_eq!(reading.sample.time_of_day(), TimeOfDay::Dawn);
    }

    #[test]
    fn rejects_malformed_clock_time() {
        assert!(parse_clock_time("25:00").is_err());
        assert!(parse_clock_time("noon").is_err());
        assert!(parse_clock_time(" 09:15 ").is_ok());
    }

    #[test]
    fn default_sample_is_the_noon_sample() {
        assert_eq!(SkySample::default(), sample_hour(12.0));
    }
}
