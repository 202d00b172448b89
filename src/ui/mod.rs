pub mod clock;
pub mod sky;
pub mod theme;

use crate::app::App;
use crate::types::ViewportSize;
use ratatui::Frame;

/// Master render function: paints the sky, then the clock overlay.
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // The resize event normally got here first; this covers the very first frame.
    let viewport = ViewportSize::from_cells(area.width, area.height);
    if app.viewport() != viewport {
        app.resize(viewport);
    }

    // Layer 0: sky
    if app.render_sky() {
        sky::draw_sky(f, area, app.surface());
    }

    // Layer 1: clock overlay
    if app.config.show_clock {
        clock::draw_clock(f, area, app);
    }
}
