/// Coarse phase of the day, derived from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    #[cfg(test)]
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Dawn,
        TimeOfDay::Day,
        TimeOfDay::Dusk,
        TimeOfDay::Night,
    ];

    /// Which body is in the sky for this phase.
    pub fn body(self) -> CelestialBody {
        match self {
            TimeOfDay::Night => CelestialBody::Moon,
            TimeOfDay::Dawn | TimeOfDay::Day | TimeOfDay::Dusk => CelestialBody::Sun,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeOfDay::Dawn => write!(f, "dawn"),
            TimeOfDay::Day => write!(f, "day"),
            TimeOfDay::Dusk => write!(f, "dusk"),
            TimeOfDay::Night => write!(f, "night"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialBody {
    Sun,
    Moon,
}

/// Drawing area in logical units (terminal columns by half-rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Each terminal cell holds two vertically stacked logical pixels.
    pub fn from_cells(columns: u16, rows: u16) -> Self {
        Self::new(columns as u32, rows as u32 * 2)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
