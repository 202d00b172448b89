use super::theme;
use crate::app::App;
use chrono::{DateTime, FixedOffset};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const INSET_X: u16 = 2;
const INSET_Y: u16 = 1;

/// 12-hour clock with a two-digit hour, e.g. `07:05 PM`.
pub fn format_clock(local: &DateTime<FixedOffset>) -> String {
    local.format("%I:%M %p").to_string()
}

/// Title on the left, time on the right, both inset from the edges.
pub fn draw_clock(f: &mut Frame, area: Rect, app: &App) {
    let inner = Rect {
        x: area.x + INSET_X,
        y: area.y + INSET_Y,
        width: area.width.saturating_sub(INSET_X * 2),
        height: area.height.saturating_sub(INSET_Y * 2),
    };
    if inner.height == 0 {
        return;
    }

    let title = app.config.title.as_str();
    let time = format_clock(&app.local_time());
    let title_width = title.width() as u16;
    let time_width = time.width() as u16;

    // Keep at least one cell of sky between the two.
    if title_width as u32 + time_width as u32 + 1 > inner.width as u32 {
        return;
    }

    if title_width > 0 {
        let title_area = Rect::new(inner.x, inner.y, title_width, 1);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(title, theme::title_style()))),
            title_area,
        );
    }

    let time_area = Rect::new(inner.right() - time_width, inner.y, time_width, 1);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(time, theme::clock_style()))),
        time_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_twelve_hour_clock() {
        let lima = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = lima.with_ymd_and_hms(2024, 5, 1, 19, 5, 0).unwrap();
        let morning = lima.with_ymd_and_hms(2024, 5, 1, 0, 30, 0).unwrap();
        assert_eq!(format_clock(&evening), "07:05 PM");
        assert_eq!(format_clock(&morning), "12:30 AM");
    }
}
