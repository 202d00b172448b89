use crate::canvas::{Gradient, Rgba, Surface};
use crate::palette::Palette;
use crate::sampler::SkySample;
use crate::types::{CelestialBody, Rgb, ViewportSize};

/// Body sits this far down the viewport when it touches the horizon.
const BASELINE: f64 = 0.9;
/// How far above the baseline the apex of the arc reaches.
const ARC_HEIGHT: f64 = 0.7;

/// Where and how big the sun or moon is drawn, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGeometry {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub glow_radius: f32,
    pub core_radius: f32,
}

/// 0 at the top of the arc, 1 at either horizon.
pub fn normalized_edge(position: f64) -> f64 {
    (position - 0.5).abs() * 2.0
}

/// Vertical placement as a fraction of the viewport height, measured from the top.
pub fn arc_height_fraction(position: f64) -> f64 {
    let edge = normalized_edge(position);
    BASELINE - ARC_HEIGHT * (1.0 - edge * edge)
}

pub fn body_geometry(viewport: ViewportSize, position: f64, narrow_breakpoint: u32) -> BodyGeometry {
    let width = viewport.width as f64;
    let height = viewport.height as f64;
    let narrow = viewport.width < narrow_breakpoint;

    let radius = width.min(height) * if narrow { 0.25 } else { 0.15 };
    let glow = if narrow { 8.0 } else { 10.0 };
    let core = if narrow { 2.5 } else { 2.0 };

    BodyGeometry {
        x: (width * (0.2 + position * 0.6)) as f32,
        y: (height * arc_height_fraction(position)) as f32,
        radius: radius as f32,
        glow_radius: (radius * glow) as f32,
        core_radius: (radius * core) as f32,
    }
}

pub fn sky_gradient(palette: &Palette) -> Gradient {
    Gradient::new()
        .stop(0.0, Rgba::opaque(palette.sky_top))
        .stop(0.5, Rgba::opaque(palette.sky_middle))
        .stop(0.85, Rgba::opaque(palette.horizon))
}

/// Wide, faint halo around the body.
pub fn glow_gradient(body: CelestialBody, tint: Rgb) -> Gradient {
    let (centre, halo, alphas) = match body {
        CelestialBody::Sun => (
            Rgba::from_rgb(Rgb::WHITE, 0.8),
            Rgba::rgba(255, 250, 230, 0.6),
            [0.4, 0.2, 0.1],
        ),
        CelestialBody::Moon => (
            Rgba::from_rgb(Rgb::WHITE, 0.6),
            Rgba::rgba(230, 240, 255, 0.5),
            [0.3, 0.15, 0.08],
        ),
    };
    Gradient::new()
        .stop(0.0, centre)
        .stop(0.1, halo)
        .stop(0.2, Rgba::from_rgb(tint, alphas[0]))
        .stop(0.4, Rgba::from_rgb(tint, alphas[1]))
        .stop(0.7, Rgba::from_rgb(tint, alphas[2]))
        .stop(1.0, Rgba::from_rgb(tint, 0.0))
}

/// Bright disc at the centre. The moon never reaches full opacity.
pub fn core_gradient(body: CelestialBody, tint: Rgb) -> Gradient {
    let (centre, inner, alphas) = match body {
        CelestialBody::Sun => (
            Rgba::from_rgb(Rgb::WHITE, 1.0),
            Rgba::rgba(255, 255, 220, 0.9),
            [0.7, 0.4],
        ),
        CelestialBody::Moon => (
            Rgba::from_rgb(Rgb::WHITE, 0.9),
            Rgba::rgba(240, 245, 255, 0.8),
            [0.6, 0.3],
        ),
    };
    Gradient::new()
        .stop(0.0, centre)
        .stop(0.2, inner)
        .stop(0.5, Rgba::from_rgb(tint, alphas[0]))
        .stop(0.8, Rgba::from_rgb(tint, alphas[1]))
        .stop(1.0, Rgba::from_rgb(tint, 0.0))
}

/// Paints the sky and its sun or moon onto an owned [`Surface`].
#[derive(Debug, Clone)]
pub struct SkyRenderer {
    surface: Surface,
    pixel_ratio: u32,
    narrow_breakpoint: u32,
}

impl SkyRenderer {
    pub fn new(pixel_ratio: u32, narrow_breakpoint: u32) -> Self {
        Self {
            surface: Surface::new(),
            pixel_ratio: pixel_ratio.max(1),
            narrow_breakpoint,
        }
    }

    pub fn resize(&mut self, viewport: ViewportSize) -> bool {
        self.surface.resize(viewport, self.pixel_ratio)
    }

    pub fn viewport(&self) -> ViewportSize {
        self.surface.logical_size()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Draws one frame. Returns `false` when the viewport is empty and nothing was drawn.
    pub fn paint(&mut self, sample: &SkySample) -> bool {
        let viewport = self.surface.logical_size();
        if viewport.is_empty() || self.surface.is_empty() {
            return false;
        }

        let tod = sample.time_of_day();
        let palette = Palette::for_time(tod);
        let body = tod.body();
        let geometry = body_geometry(viewport, sample.position(), self.narrow_breakpoint);

        self.surface.fill_linear_vertical(&sky_gradient(palette));
        self.surface.fill_circle(
            geometry.x,
            geometry.y,
            geometry.glow_radius,
            &glow_gradient(body, palette.celestial_body),
        );
        self.surface.fill_circle(
            geometry.x,
            geometry.y,
            geometry.core_radius,
            &core_gradient(body, palette.celestial_body),
        );
        true
    }
}
