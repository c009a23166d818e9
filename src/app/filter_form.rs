use derivative::Derivative;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::app::filter::PersonQuery;

use super::ui::App;

const FIELD_COUNT: usize = 3;

// State object for the person filter form.
// Keeps track of the cursor and the three predicate inputs.
#[derive(Derivative)]
#[derivative(Default)]
pub struct FilterFormState {
    pub active: bool,
    name: String,
    age: String,
    city: String,
    cursor: (usize, usize),
}

impl FilterFormState {
    pub fn open(&mut self) {
        self.active = true;
        self.cursor = (0, 0);
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    // Turn the raw fields into a query and clear them,
    // the same way the inputs are cleared after filtering
    pub fn take_query(&mut self) -> PersonQuery {
        let query = PersonQuery::from_inputs(&self.name, &self.age, &self.city);
        self.name.clear();
        self.age.clear();
        self.city.clear();
        self.cursor = (0, 0);
        query
    }

    // Think of this as a mapper of vertical cursor position to the field
    fn field(&self, y_position: usize) -> &str {
        match y_position {
            0 => &self.name,
            1 => &self.age,
            _ => &self.city,
        }
    }

    fn field_mut(&mut self, y_position: usize) -> &mut String {
        match y_position {
            0 => &mut self.name,
            1 => &mut self.age,
            _ => &mut self.city,
        }
    }

    // Move the cursor one field DOWN.
    // The horizontal position is preserved where the next field allows it.
    pub fn move_cursor_down(&mut self) {
        let y = (self.cursor.1 + 1).min(FIELD_COUNT - 1);
        self.cursor = (self.cursor.0.min(self.field(y).len()), y);
    }

    // Move the cursor one field UP.
    pub fn move_cursor_up(&mut self) {
        if self.cursor.1 == 0 {
            return;
        }
        let y = self.cursor.1 - 1;
        self.cursor = (self.cursor.0.min(self.field(y).len()), y);
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor.0 > 0 {
            self.cursor = (self.cursor.0 - 1, self.cursor.1);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let limit = self.field(self.cursor.1).len();
        self.cursor = ((self.cursor.0 + 1).min(limit), self.cursor.1);
    }

    // Insert a char into the active field at the cursor
    pub fn input(&mut self, to_insert: char) {
        let (x, y) = self.cursor;
        self.field_mut(y).insert(x, to_insert);
        self.cursor = (x + 1, y);
    }

    // Delete the char before the cursor in the active field
    pub fn delete_char(&mut self) {
        let (x, y) = self.cursor;
        if x == 0 {
            return;
        }
        self.field_mut(y).remove(x - 1);
        self.cursor = (x - 1, y);
    }
}

// Returns the UI content for the person filter form
pub fn get_filter_form_ui<'a>(app: &'a App<'a>) -> Vec<Line<'a>> {
    const GRAY_TEXT: Style = Style::new().fg(Color::Rgb(62, 62, 62));
    const WHITE_TEXT: Style = Style::new().fg(Color::White);
    const BLACK_ON_WHITE: Style = Style::new().fg(Color::Black).bg(Color::White);
    let mut text = Vec::new();

    struct FormInputLine {
        prefix: String,
        placeholder: String,
        value: String,
    }

    let form = &app.filter_form;
    let lines = vec![
        FormInputLine {
            prefix: "Name: ".into(),
            placeholder: "Part of a name".into(),
            value: form.field(0).to_string(),
        },
        FormInputLine {
            prefix: "Age:  ".into(),
            placeholder: "28".into(),
            value: form.field(1).to_string(),
        },
        FormInputLine {
            prefix: "City: ".into(),
            placeholder: "Part of a city".into(),
            value: form.field(2).to_string(),
        },
    ];

    let cursor_position = form.cursor;

    for (i, line) in lines.iter().enumerate() {
        let mut spans = Vec::new();

        // Each line starts with a prefix, for example "Name: "
        spans.push(Span::styled(line.prefix.clone(), WHITE_TEXT));

        if line.value.is_empty() {
            // If the line is empty, a placeholder is displayed
            if cursor_position.1 == i {
                // Line is selected. First char is highlighted, the rest is gray
                spans.push(Span::styled(
                    line.placeholder.chars().take(1).collect::<String>(),
                    BLACK_ON_WHITE,
                ));
                spans.push(Span::styled(
                    line.placeholder.chars().skip(1).collect::<String>(),
                    GRAY_TEXT,
                ));
            } else {
                // Line is not selected. All chars are gray
                spans.push(Span::styled(line.placeholder.clone(), GRAY_TEXT));
            }
        } else if cursor_position.1 == i {
            // All chars are white, except for the one at the cursor position
            spans.push(Span::styled(
                line.value.chars().take(cursor_position.0).collect::<String>(),
                WHITE_TEXT,
            ));
            spans.push(Span::styled(
                line.value
                    .chars()
                    .skip(cursor_position.0)
                    .take(1)
                    .collect::<String>(),
                BLACK_ON_WHITE,
            ));
            spans.push(Span::styled(
                line.value
                    .chars()
                    .skip(cursor_position.0 + 1)
                    .collect::<String>(),
                WHITE_TEXT,
            ));

            if cursor_position.0 == line.value.len() {
                spans.push(Span::styled(" ", BLACK_ON_WHITE));
            }
        } else {
            // All chars are white if the line is not selected
            spans.push(Span::styled(line.value.clone(), WHITE_TEXT));
        }

        text.push(Line::from(spans));
    }

    text.push(Line::raw("\n"));

    // Empty fields are allowed: they simply apply no predicate
    text.push(Line::from(vec![Span::styled(
        "Enter - apply, Esc - cancel",
        WHITE_TEXT,
    )]));

    return text;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut FilterFormState, text: &str) {
        for c in text.chars() {
            form.input(c);
        }
    }

    #[test]
    fn input_goes_into_the_active_field() {
        let mut form = FilterFormState::default();
        form.open();
        type_into(&mut form, "Anna");
        form.move_cursor_down();
        type_into(&mut form, "28");
        form.move_cursor_down();
        type_into(&mut form, "Boston");

        let query = form.take_query();
        assert_eq!(query.name.as_deref(), Some("Anna"));
        assert_eq!(query.age, Some(28));
        assert_eq!(query.city.as_deref(), Some("Boston"));
    }

    #[test]
    fn take_query_clears_the_fields() {
        let mut form = FilterFormState::default();
        form.open();
        type_into(&mut form, "Anna");
        form.take_query();
        assert!(form.take_query().is_empty());
    }

    #[test]
    fn cursor_clamps_to_the_shorter_field_below() {
        let mut form = FilterFormState::default();
        form.open();
        type_into(&mut form, "Alice");
        form.move_cursor_down();
        // Age field is empty, so the horizontal position collapses to 0
        form.input('3');
        form.input('0');

        let query = form.take_query();
        assert_eq!(query.age, Some(30));
    }

    #[test]
    fn cursor_does_not_leave_the_form() {
        let mut form = FilterFormState::default();
        form.open();
        form.move_cursor_up();
        form.move_cursor_down();
        form.move_cursor_down();
        form.move_cursor_down();
        type_into(&mut form, "Austin");

        let query = form.take_query();
        assert_eq!(query.city.as_deref(), Some("Austin"));
    }

    #[test]
    fn backspace_edits_the_active_field() {
        let mut form = FilterFormState::default();
        form.open();
        type_into(&mut form, "Annna");
        form.move_cursor_left();
        form.delete_char();
        let query = form.take_query();
        assert_eq!(query.name.as_deref(), Some("Anna"));
    }
}
