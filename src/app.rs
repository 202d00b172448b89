use crate::canvas::Surface;
use crate::config::Config;
use crate::error::ConfigError;
use crate::renderer::SkyRenderer;
use crate::sampler::{hour_of_day, Reading, SkySample, TimeSampler, TimeSource};
use crate::types::ViewportSize;
use chrono::{DateTime, FixedOffset};

/// Top-level application state, read fresh by every frame.
pub struct App {
    pub config: Config,
    sampler: TimeSampler,
    reading: Reading,
    renderer: SkyRenderer,
    pub should_quit: bool,
    pub frames: u64,
}

impl App {
    pub fn new(config: Config, source: TimeSource) -> Result<Self, ConfigError> {
        let sampler = TimeSampler::new(config.offset()?, source);
        let reading = sampler.read();
        let renderer = SkyRenderer::new(config.pixel_ratio, config.narrow_breakpoint);
        Ok(Self {
            config,
            sampler,
            reading,
            renderer,
            should_quit: false,
            frames: 0,
        })
    }

    /// Re-read the wall clock; sky state and clock text change together.
    pub fn resample(&mut self) {
        let reading = self.sampler.read();
        self.apply_reading(reading);
    }

    pub fn apply_reading(&mut self, reading: Reading) {
        let previous = self.reading.sample.time_of_day();
        let current = reading.sample.time_of_day();
        tracing::debug!(
            hour = hour_of_day(&reading.local),
            time_of_day = %current,
            position = reading.sample.position(),
            "resampled"
        );
        if previous != current {
            tracing::info!("sky changed from {} to {}", previous, current);
        }
        self.reading = reading;
    }

    pub fn sample(&self) -> SkySample {
        self.reading.sample
    }

    pub fn local_time(&self) -> DateTime<FixedOffset> {
        self.reading.local
    }

    pub fn viewport(&self) -> ViewportSize {
        self.renderer.viewport()
    }

    /// Must run before the next frame after the terminal changes size.
    pub fn resize(&mut self, viewport: ViewportSize) -> bool {
        let changed = self.renderer.resize(viewport);
        if changed {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                device = ?self.renderer.surface().device_size(),
                "viewport resized"
            );
        }
        changed
    }

    /// Paint the sky for the latest sample. `false` means the frame was skipped.
    pub fn render_sky(&mut self) -> bool {
        let sample = self.sample();
        self.renderer.paint(&sample)
    }

    pub fn surface(&self) -> &Surface {
        self.renderer.surface()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// App pinned to a local `HH:MM`, for tests.
#[cfg(test)]
pub(crate) fn app_at(hh_mm: &str) -> App {
    let at = crate::sampler::parse_clock_time(hh_mm).unwrap();
    App::new(Config::default(), TimeSource::Fixed(at)).unwrap()
}
