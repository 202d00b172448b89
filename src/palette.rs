use crate::types::{Rgb, TimeOfDay};

/// Sky and body colors for one phase of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky_top: Rgb,
    pub sky_middle: Rgb,
    pub horizon: Rgb,
    pub celestial_body: Rgb,
}

pub const DAWN: Palette = Palette {
    sky_top: Rgb::new(100, 170, 235),
    sky_middle: Rgb::new(140, 190, 240),
    horizon: Rgb::new(175, 210, 245),
    celestial_body: Rgb::new(255, 196, 102),
};

pub const DAY: Palette = Palette {
    sky_top: Rgb::new(64, 156, 255),
    sky_middle: Rgb::new(120, 190, 240),
    horizon: Rgb::new(155, 210, 250),
    celestial_body: Rgb::new(255, 214, 102),
};

pub const DUSK: Palette = Palette {
    sky_top: Rgb::new(70, 140, 205),
    sky_middle: Rgb::new(125, 170, 220),
    horizon: Rgb::new(160, 195, 235),
    celestial_body: Rgb::new(255, 180, 80),
};

// Moon is plain white.
pub const NIGHT: Palette = Palette {
    sky_top: Rgb::new(10, 40, 95),
    sky_middle: Rgb::new(25, 55, 110),
    horizon: Rgb::new(40, 75, 130),
    celestial_body: Rgb::new(240, 240, 240),
};

impl Palette {
    pub fn for_time(time_of_day: TimeOfDay) -> &'static Palette {
        match time_of_day {
            TimeOfDay::Dawn => &DAWN,
            TimeOfDay::Day => &DAY,
            TimeOfDay::Dusk => &DUSK,
            TimeOfDay::Night => &NIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_its_own_palette() {
        let palettes: Vec<_> = TimeOfDay::ALL.iter().map(|t| Palette::for_time(*t)).collect();
        for (i, a) in palettes.iter().enumerate() {
            for b in &palettes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn night_sky_is_darker_than_day() {
        let night = Palette::for_time(TimeOfDay::Night).sky_top;
        let day = Palette::for_time(TimeOfDay::Day).sky_top;
        assert!(night.b < day.b && night.g < day.g);
    }
}
