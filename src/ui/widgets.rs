//! Widgets for the journal dashboard: workout list, form, status bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::session::{FormInput, FormPrefill};
use crate::core::workout::{KindTag, WorkoutKind};
use super::help::centered_rect;
use super::surface::ListEntry;
use super::theme::Theme;

/// Form fields in focus order: kind selector, then the three numeric fields
pub const FORM_FIELDS: usize = 4;

/// Editable state of the workout form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: KindTag,
    pub distance: String,
    pub duration: String,
    pub kind_field: String,
    pub focused: usize,
}

impl FormState {
    /// Fresh form, optionally pre-seeded from an edited workout
    pub fn new(prefill: Option<&FormPrefill>) -> Self {
        match prefill {
            Some(p) => FormState {
                kind: p.kind,
                distance: format!("{}", p.distance_km),
                duration: format!("{}", p.duration_min),
                kind_field: format!("{}", p.kind_field),
                focused: 1,
            },
            None => FormState {
                kind: KindTag::Running,
                distance: String::new(),
                duration: String::new(),
                kind_field: String::new(),
                focused: 1,
            },
        }
    }

    /// Snapshot the raw field contents for submission
    pub fn input(&self) -> FormInput {
        FormInput {
            kind: self.kind,
            distance: self.distance.clone(),
            duration: self.duration.clone(),
            kind_field: self.kind_field.clone(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % FORM_FIELDS;
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.checked_sub(1).unwrap_or(FORM_FIELDS - 1);
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    /// Append a character to the focused numeric field
    pub fn push_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        if let Some(field) = self.focused_text_mut() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_text_mut() {
            field.pop();
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            1 => Some(&mut self.distance),
            2 => Some(&mut self.duration),
            3 => Some(&mut self.kind_field),
            _ => None,
        }
    }

    /// Label of the kind-specific field for the selected kind
    pub fn kind_field_label(&self) -> &'static str {
        match self.kind {
            KindTag::Running => "Cadence (spm)",
            KindTag::Cycling => "Elev. gain (m)",
        }
    }
}

/// Workout form overlay, shown while composing
pub struct FormPanel<'a> {
    form: &'a FormState,
    theme: &'a Theme,
}

impl<'a> FormPanel<'a> {
    pub fn new(form: &'a FormState, theme: &'a Theme) -> Self {
        FormPanel { form, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(40, 40, area);
        frame.render_widget(Clear, popup);

        let kind_name = match self.form.kind {
            KindTag::Running => "running",
            KindTag::Cycling => "cycling",
        };

        let rows: [(&str, String); 4] = [
            ("Type (t to toggle)", kind_name.to_string()),
            ("Distance (km)", self.form.distance.clone()),
            ("Duration (min)", self.form.duration.clone()),
            (self.form.kind_field_label(), self.form.kind_field.clone()),
        ];

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (idx, (label, value)) in rows.into_iter().enumerate() {
            let focused = idx == self.form.focused;
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{label:<20}"), self.theme.normal_style()),
                Span::styled(format!("{value} "), value_style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Enter submits, Esc cancels",
            Style::default().add_modifier(Modifier::DIM),
        )));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(" New workout ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(self.theme.focused_border_style())
                .title_style(self.theme.title_style()),
        );

        frame.render_widget(paragraph, popup);
    }
}

/// Workouts list panel widget
pub struct WorkoutListPanel<'a> {
    entries: &'a [ListEntry],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> WorkoutListPanel<'a> {
    pub fn new(entries: &'a [ListEntry], selected: usize, theme: &'a Theme) -> Self {
        WorkoutListPanel {
            entries,
            selected,
            theme,
        }
    }

    /// Index into `entries` of the selected (active) row, if any
    fn selected_row(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_fading())
            .nth(self.selected)
            .map(|(idx, _)| idx)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let w = &entry.workout;
                let (derived_unit, field_unit) = match w.kind {
                    WorkoutKind::Running { .. } => ("min/km", "spm"),
                    WorkoutKind::Cycling { .. } => ("km/h", "m"),
                };
                let text = format!(
                    "{}  {} km  {} min  {:.1} {}  {:.0} {}",
                    w.description,
                    w.distance_km,
                    w.duration_min,
                    w.derived_value(),
                    derived_unit,
                    w.kind_field(),
                    field_unit,
                );
                let style = if entry.is_fading() {
                    self.theme.fading_style()
                } else {
                    Style::default().fg(self.theme.kind_color(w.kind.tag()))
                };
                ListItem::new(Span::styled(text, style))
            })
            .collect();

        let block = Block::default()
            .title(format!(" Workouts ({}) ", self.entries.len()))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(if focused {
                self.theme.focused_border_style()
            } else {
                self.theme.border_style()
            });

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if focused {
            state.select(self.selected_row());
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    composing: bool,
    count: usize,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(composing: bool, count: usize, error: Option<&'a str>, theme: &'a Theme) -> Self {
        StatusBar {
            composing,
            count,
            error,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(e) = self.error {
            Line::from(Span::styled(format!("Error: {e}"), self.theme.error_style()))
        } else if self.composing {
            Line::from("waylog: fill in the form | Enter submit, Esc cancel".to_string())
        } else {
            Line::from(format!(
                "waylog: {} workout(s) | Enter log here, d delete, e edit | [h] Help [q] Quit",
                self.count
            ))
        };

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_starts_on_distance() {
        let form = FormState::new(None);
        assert_eq!(form.kind, KindTag::Running);
        assert_eq!(form.focused, 1);
        assert!(form.distance.is_empty());
    }

    #[test]
    fn test_prefill_seeds_every_field() {
        let prefill = FormPrefill {
            kind: KindTag::Cycling,
            distance_km: 20.0,
            duration_min: 60.0,
            kind_field: 300.0,
        };
        let form = FormState::new(Some(&prefill));
        assert_eq!(form.kind, KindTag::Cycling);
        assert_eq!(form.distance, "20");
        assert_eq!(form.duration, "60");
        assert_eq!(form.kind_field, "300");
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut form = FormState::new(None);
        form.focused = FORM_FIELDS - 1;
        form.next_field();
        assert_eq!(form.focused, 0);
        form.prev_field();
        assert_eq!(form.focused, FORM_FIELDS - 1);
    }

    #[test]
    fn test_typing_edits_focused_field_only() {
        let mut form = FormState::new(None);
        form.push_char('5');
        form.push_char('.');
        form.push_char('5');
        form.push_char('x'); // rejected
        assert_eq!(form.distance, "5.5");
        assert!(form.duration.is_empty());

        form.backspace();
        assert_eq!(form.distance, "5.");
    }

    #[test]
    fn test_kind_toggle_switches_field_label() {
        let mut form = FormState::new(None);
        assert_eq!(form.kind_field_label(), "Cadence (spm)");
        form.toggle_kind();
        assert_eq!(form.kind, KindTag::Cycling);
        assert_eq!(form.kind_field_label(), "Elev. gain (m)");
    }

    #[test]
    fn test_input_snapshot_matches_fields() {
        let mut form = FormState::new(None);
        form.push_char('5');
        form.next_field();
        form.push_char('3');
        form.push_char('0');
        let input = form.input();
        assert_eq!(input.distance, "5");
        assert_eq!(input.duration, "30");
        assert_eq!(input.kind, KindTag::Running);
    }
}
