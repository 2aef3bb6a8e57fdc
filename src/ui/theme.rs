//! Color theme for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::workout::KindTag;

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub border: Color,
    pub title: Color,
    pub running: Color,
    pub cycling: Color,
    pub cursor: Color,
    pub error: Color,
    pub fading: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bg: Color::Reset,
            fg: Color::White,
            highlight_bg: Color::Rgb(60, 60, 80),
            highlight_fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            running: Color::Green,
            cycling: Color::Yellow,
            cursor: Color::Magenta,
            error: Color::Red,
            fading: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Get style for normal text
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for focused panel borders (distinct from normal borders)
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Get style for the status-bar error text
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Get style for list entries fading out after a delete
    pub fn fading_style(&self) -> Style {
        Style::default()
            .fg(self.fading)
            .add_modifier(Modifier::DIM)
    }

    /// Marker and list accent color for a workout kind
    pub fn kind_color(&self, kind: KindTag) -> Color {
        match kind {
            KindTag::Running => self.running,
            KindTag::Cycling => self.cycling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_colors_are_distinct() {
        let theme = Theme::default();
        assert_ne!(
            theme.kind_color(KindTag::Running),
            theme.kind_color(KindTag::Cycling)
        );
    }
}
