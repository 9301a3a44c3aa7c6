use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::Component;
use crate::{action::Action, app::AppState, layout, model::ViewMode, tui::Frame};

const LABEL_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Text {
        label: &'static str,
        placeholder: &'static str,
        value: String,
    },
    Select {
        label: &'static str,
        options: &'static [&'static str],
        selected: usize,
    },
    Choice {
        label: &'static str,
        options: &'static [&'static str],
        selected: Option<usize>,
    },
    Checkbox {
        label: &'static str,
        checked: bool,
    },
    Submit {
        label: &'static str,
    },
}

impl Field {
    fn text(label: &'static str, placeholder: &'static str) -> Self {
        Field::Text {
            label,
            placeholder,
            value: String::new(),
        }
    }

    fn line(&self, focused: bool) -> Line<'_> {
        let marker = if focused { "> " } else { "  " };
        let focus = if focused {
            Style::new().bold()
        } else {
            Style::default()
        };
        let label = |label: &str| Span::styled(format!("{marker}{label:<LABEL_WIDTH$}"), focus);

        match self {
            Field::Text {
                label: text,
                placeholder,
                value,
            } => {
                let input = if value.is_empty() {
                    Span::styled(*placeholder, Style::new().dark_gray())
                } else {
                    Span::raw(value.as_str())
                };
                let cursor = if focused { "_" } else { "" };
                Line::from(vec![label(*text), input, Span::raw(cursor)])
            }
            Field::Select {
                label: text,
                options,
                selected,
            } => Line::from(vec![
                label(*text),
                Span::styled(format!("‹ {} ›", options[*selected]), focus),
            ]),
            Field::Choice {
                label: text,
                options,
                selected,
            } => {
                let mut spans = vec![label(*text)];
                for (i, option) in options.iter().enumerate() {
                    let dot = if *selected == Some(i) { "(•)" } else { "( )" };
                    spans.push(Span::raw(format!("{dot} {option}  ")));
                }
                Line::from(spans)
            }
            Field::Checkbox { label, checked } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                Line::from(Span::styled(format!("{marker}{mark} {label}"), focus))
            }
            Field::Submit { label } => {
                let style = if focused {
                    Style::new().black().on_white().bold()
                } else {
                    Style::new().reversed()
                };
                Line::from(vec![Span::raw(marker), Span::styled(format!("[ {label} ]"), style)])
            }
        }
    }
}

/// Company registration form. Purely presentational: values typed in stay
/// inside the widget, nothing reads them, and submitting does nothing.
pub struct RegistrationForm {
    fields: Vec<Field>,
    focus: usize,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                Field::text("Company Name", "Innovatech Solutions"),
                Field::Select {
                    label: "Industry Sector",
                    options: &["Technology", "Finance", "Healthcare"],
                    selected: 0,
                },
                Field::text("Contact Email", "contact@innovatech.com"),
                Field::text("Headquarters City", "San Francisco"),
                Field::Choice {
                    label: "Employee Size",
                    options: &["1-50", "51-200", "200+"],
                    selected: None,
                },
                Field::Checkbox {
                    label: "Agree to Terms and Conditions",
                    checked: false,
                },
                Field::Submit { label: "Submit" },
            ],
            focus: 0,
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        let len = self.fields.len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn submit() {
        log::debug!("Registration form submitted, submission is suppressed");
    }

    fn edit(&mut self, key: KeyEvent) {
        match (&mut self.fields[self.focus], key.code) {
            (Field::Text { value, .. }, KeyCode::Char(c))
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                value.push(c)
            }
            (Field::Text { value, .. }, KeyCode::Backspace) => {
                value.pop();
            }
            (Field::Select { options, selected, .. }, KeyCode::Right | KeyCode::Char(' ')) => {
                *selected = (*selected + 1) % options.len()
            }
            (Field::Select { options, selected, .. }, KeyCode::Left) => {
                *selected = (*selected + options.len() - 1) % options.len()
            }
            (Field::Choice { options, selected, .. }, KeyCode::Right | KeyCode::Char(' ')) => {
                let len = options.len();
                *selected = Some(selected.map_or(0, |i| (i + 1) % len))
            }
            (Field::Choice { options, selected, .. }, KeyCode::Left) => {
                let len = options.len();
                *selected = Some(selected.map_or(len - 1, |i| (i + len - 1) % len))
            }
            (Field::Checkbox { checked, .. }, KeyCode::Char(' ')) => *checked = !*checked,
            (Field::Submit { .. }, KeyCode::Enter | KeyCode::Char(' ')) => Self::submit(),
            _ => {}
        }
    }
}

impl Component for RegistrationForm {
    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        if state.view() != ViewMode::Form {
            return Ok(None);
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => self.edit(key),
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &AppState) -> Result<()> {
        if state.view() != ViewMode::Form {
            return Ok(());
        }

        let area = layout::page(area).body;
        let lines: Vec<Line> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| field.line(i == self.focus))
            .collect();

        let form = Paragraph::new(lines).block(
            Block::new()
                .title("Company Registration")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .padding(Padding::uniform(1)),
        );

        f.render_widget(form, area);
        Ok(())
    }
}
