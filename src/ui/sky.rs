use super::theme;
use crate::canvas::Surface;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;

pub fn draw_sky(f: &mut Frame, area: Rect, surface: &Surface) {
    f.render_widget(SkyWidget { surface }, area);
}

/// Blits a painted [`Surface`] into the buffer, two logical pixels per cell.
pub struct SkyWidget<'a> {
    pub surface: &'a Surface,
}

impl Widget for SkyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for row in 0..area.height {
            for col in 0..area.width {
                let upper = self.surface.logical_pixel(col as u32, row as u32 * 2);
                let lower = self.surface.logical_pixel(col as u32, row as u32 * 2 + 1);
                let (Some(upper), Some(lower)) = (upper, lower) else {
                    continue;
                };

                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_char(theme::HALF_BLOCK);
                cell.set_fg(theme::color(upper));
                cell.set_bg(theme::color(lower));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Gradient, Rgba};
    use crate::types::{Rgb, ViewportSize};
    use ratatui::style::Color;

    #[test]
    fn each_cell_carries_two_pixels() {
        let mut surface = Surface::new();
        surface.resize(ViewportSize::from_cells(3, 2), 1);
        surface.fill_linear_vertical(
            &Gradient::new()
                .stop(0.0, Rgba::opaque(Rgb::new(0, 0, 0)))
                .stop(1.0, Rgba::opaque(Rgb::new(0, 0, 0))),
        );
        // A red disc covering only the top-left logical pixel.
        surface.fill_circle(0.5, 0.5, 0.5, &Gradient::new().stop(0.0, Rgba::opaque(Rgb::new(255, 0, 0))));

        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        SkyWidget { surface: &surface }.render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(2, 1)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn cells_outside_the_surface_are_untouched() {
        let mut surface = Surface::new();
        surface.resize(ViewportSize::from_cells(2, 1), 1);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        SkyWidget { surface: &surface }.render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "▀");
        assert_eq!(buf[(3, 1)].symbol(), " ");
    }
}
