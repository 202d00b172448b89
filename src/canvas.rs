use crate::types::{Rgb, ViewportSize};

/// Straight (non-premultiplied) color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn from_rgb(rgb: Rgb, alpha: f32) -> Self {
        Self {
            r: rgb.r as f32 / 255.0,
            g: rgb.g as f32 / 255.0,
            b: rgb.b as f32 / 255.0,
            a: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn opaque(rgb: Rgb) -> Self {
        Self::from_rgb(rgb, 1.0)
    }

    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self::from_rgb(Rgb::new(r, g, b), alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Ordered color stops, interpolated in premultiplied space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop; stops with equal offsets keep insertion order.
    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, ColorStop { offset, color });
        self
    }

    #[cfg(test)]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at `t`; values outside the stop range take the nearest end stop.
    pub fn sample(&self, t: f32) -> Rgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgba::TRANSPARENT,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        let upper = self.stops.partition_point(|s| s.offset <= t);
        let a = &self.stops[upper - 1];
        let b = &self.stops[upper];
        let span = b.offset - a.offset;
        if span <= f32::EPSILON {
            return b.color;
        }
        lerp_premultiplied(a.color, b.color, (t - a.offset) / span)
    }
}

fn lerp_premultiplied(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let alpha = a.a + (b.a - a.a) * t;
    if alpha <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let channel = |ca: f32, cb: f32| (ca * a.a + (cb * b.a - ca * a.a) * t) / alpha;
    Rgba {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
        a: alpha,
    }
}

/// Opaque RGB pixel buffer sized in device pixels.
///
/// Fill operations take logical coordinates; each logical unit spans
/// `pixel_ratio` device pixels per axis, sampled at their centres.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    logical: ViewportSize,
    ratio: u32,
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocates for a new viewport; returns `false` when nothing changed.
    pub fn resize(&mut self, viewport: ViewportSize, pixel_ratio: u32) -> bool {
        let ratio = pixel_ratio.max(1);
        if viewport == self.logical && ratio == self.ratio {
            return false;
        }
        self.logical = viewport;
        self.ratio = ratio;
        self.width = (viewport.width * ratio) as usize;
        self.height = (viewport.height * ratio) as usize;
        self.pixels = vec![[0.0; 3]; self.width * self.height];
        true
    }

    pub fn logical_size(&self) -> ViewportSize {
        self.logical
    }

    pub fn device_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn to_logical(&self, device: usize) -> f32 {
        (device as f32 + 0.5) / self.ratio as f32
    }

    /// Paints a top-to-bottom gradient across the whole surface.
    pub fn fill_linear_vertical(&mut self, gradient: &Gradient) {
        if self.is_empty() {
            return;
        }
        let height = self.logical.height as f32;
        for py in 0..self.height {
            let color = gradient.sample(self.to_logical(py) / height);
            let row = &mut self.pixels[py * self.width..(py + 1) * self.width];
            for px in row.iter_mut() {
                blend(px, color);
            }
        }
    }

    /// Fills a disc whose color runs from `gradient(0)` at the centre to `gradient(1)` at the rim.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, gradient: &Gradient) {
        if self.is_empty() || radius <= 0.0 {
            return;
        }
        let ratio = self.ratio as f32;
        let device_range = |centre: f32, limit: usize| {
            let lo = ((centre - radius) * ratio).floor().max(0.0) as usize;
            let hi = ((centre + radius) * ratio).ceil().max(0.0) as usize;
            (lo.min(limit), hi.min(limit))
        };
        let (x0, x1) = device_range(cx, self.width);
        let (y0, y1) = device_range(cy, self.height);

        for py in y0..y1 {
            let dy = self.to_logical(py) - cy;
            for px in x0..x1 {
                let dx = self.to_logical(px) - cx;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > radius {
                    continue;
                }
                let color = gradient.sample(distance / radius);
                blend(&mut self.pixels[py * self.width + px], color);
            }
        }
    }

    /// Box-filtered color of one logical pixel.
    pub fn logical_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.logical.width || y >= self.logical.height {
            return None;
        }
        let ratio = self.ratio as usize;
        let mut sum = [0.0f32; 3];
        for dy in 0..ratio {
            let row = (y as usize * ratio + dy) * self.width;
            for dx in 0..ratio {
                let px = self.pixels[row + x as usize * ratio + dx];
                sum[0] += px[0];
                sum[1] += px[1];
                sum[2] += px[2];
            }
        }
        let n = (ratio * ratio) as f32;
        let to_u8 = |v: f32| ((v / n) * 255.0).round().clamp(0.0, 255.0) as u8;
        Some(Rgb::new(to_u8(sum[0]), to_u8(sum[1]), to_u8(sum[2])))
    }
}

/// Source-over onto an opaque destination.
fn blend(dst: &mut [f32; 3], src: Rgba) {
    let a = src.a;
    if a <= 0.0 {
        return;
    }
    dst[0] = src.r * a + dst[0] * (1.0 - a);
    dst[1] = src.g * a + dst[1] * (1.0 - a);
    dst[2] = src.b * a + dst[2] * (1.0 - a);
}
