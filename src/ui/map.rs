//! Map panel: canvas with workout markers and the click cursor.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders,
    },
    Frame,
};

use crate::core::workout::{Coordinates, KindTag};
use super::surface::TerminalMap;
use super::theme::Theme;

/// Map panel widget
pub struct MapPanel<'a> {
    map: &'a TerminalMap,
    cursor: Coordinates,
    theme: &'a Theme,
}

impl<'a> MapPanel<'a> {
    pub fn new(map: &'a TerminalMap, cursor: Coordinates, theme: &'a Theme) -> Self {
        MapPanel { map, cursor, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };

        let span = self.map.span_deg();
        let center = self.map.center;
        // Terminal cells are roughly twice as wide as tall
        let x_half = span / 2.0;
        let y_half = span / 4.0;
        let x_bounds = [center.lng - x_half, center.lng + x_half];
        let y_bounds = [center.lat - y_half, center.lat + y_half];

        // Split markers by kind so each gets its color
        let mut running: Vec<(f64, f64)> = Vec::new();
        let mut cycling: Vec<(f64, f64)> = Vec::new();
        for marker in &self.map.markers {
            let point = (marker.at.lng, marker.at.lat);
            if marker.label.starts_with("Running") {
                running.push(point);
            } else {
                cycling.push(point);
            }
        }

        let title = format!(
            " Map ({:.4}, {:.4}) z{} ",
            center.lat, center.lng, self.map.zoom
        );

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title_style(self.theme.title_style()),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &running,
                    color: self.theme.kind_color(KindTag::Running),
                });
                ctx.draw(&Points {
                    coords: &cycling,
                    color: self.theme.kind_color(KindTag::Cycling),
                });

                // Marker labels, offset slightly so the point stays visible
                for marker in &self.map.markers {
                    let color = if marker.label.starts_with("Running") {
                        self.theme.kind_color(KindTag::Running)
                    } else {
                        self.theme.kind_color(KindTag::Cycling)
                    };
                    ctx.print(
                        marker.at.lng,
                        marker.at.lat,
                        Span::styled(format!("● {}", marker.label), Style::default().fg(color)),
                    );
                }

                // Click cursor
                ctx.print(
                    self.cursor.lng,
                    self.cursor.lat,
                    Span::styled(
                        "+",
                        Style::default()
                            .fg(self.theme.cursor)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            });

        frame.render_widget(canvas, area);
    }
}
