use derivative::Derivative;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::ui::App;

// What the committed line will be used for
#[derive(Clone, Copy, Debug, Derivative, PartialEq)]
#[derivative(Default)]
pub enum InputPurpose {
    #[derivative(Default)]
    AddTask,
    SearchTasks,
}

// State object for the one-line task input.
// Keeps track of the purpose, the typed text and the cursor position.
#[derive(Derivative)]
#[derivative(Default)]
pub struct TaskInputState {
    pub active: bool,
    pub purpose: InputPurpose,
    value: String,
    cursor: usize,
}

impl TaskInputState {
    // Opens the input line and prepares to accept text for the given purpose
    pub fn open(&mut self, purpose: InputPurpose) {
        self.active = true;
        self.purpose = purpose;
        self.value.clear();
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    // Insert a char at the cursor and advance it
    pub fn input(&mut self, to_insert: char) {
        self.value.insert(self.cursor, to_insert);
        self.cursor += 1;
    }

    // Delete the char before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.value.remove(self.cursor - 1);
        self.cursor -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.len());
    }
}

// Returns the UI content for the task input line
pub fn get_task_input_ui<'a>(app: &'a App<'a>) -> Vec<Line<'a>> {
    const GRAY_TEXT: Style = Style::new().fg(Color::Rgb(62, 62, 62));
    const WHITE_TEXT: Style = Style::new().fg(Color::White);
    const BLACK_ON_WHITE: Style = Style::new().fg(Color::Black).bg(Color::White);

    let input = &app.task_input;
    let (prefix, placeholder, help) = match input.purpose {
        InputPurpose::AddTask => ("Task:   ", "My new task", "Enter - add, Esc - cancel"),
        InputPurpose::SearchTasks => ("Search: ", "Text to look for", "Enter - search, Esc - cancel"),
    };

    let mut spans = vec![Span::styled(prefix, WHITE_TEXT)];

    if input.value.is_empty() {
        // Empty line: show the placeholder with its first char highlighted as the cursor
        spans.push(Span::styled(
            placeholder.chars().take(1).collect::<String>(),
            BLACK_ON_WHITE,
        ));
        spans.push(Span::styled(
            placeholder.chars().skip(1).collect::<String>(),
            GRAY_TEXT,
        ));
    } else {
        // The char at the cursor position is highlighted, the rest is plain
        spans.push(Span::styled(
            input.value.chars().take(input.cursor).collect::<String>(),
            WHITE_TEXT,
        ));
        spans.push(Span::styled(
            input
                .value
                .chars()
                .skip(input.cursor)
                .take(1)
                .collect::<String>(),
            BLACK_ON_WHITE,
        ));
        spans.push(Span::styled(
            input
                .value
                .chars()
                .skip(input.cursor + 1)
                .collect::<String>(),
            WHITE_TEXT,
        ));
        if input.cursor == input.value.len() {
            spans.push(Span::styled(" ", BLACK_ON_WHITE));
        }
    }

    return vec![
        Line::from(spans),
        Line::raw("\n"),
        Line::from(vec![Span::styled(help, WHITE_TEXT)]),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_resets_the_previous_text() {
        let mut input = TaskInputState::default();
        input.open(InputPurpose::AddTask);
        input.input('h');
        input.input('i');
        input.open(InputPurpose::SearchTasks);
        assert_eq!(input.value(), "");
        assert_eq!(input.purpose, InputPurpose::SearchTasks);
    }

    #[test]
    fn chars_insert_at_the_cursor() {
        let mut input = TaskInputState::default();
        input.open(InputPurpose::AddTask);
        for c in "bye".chars() {
            input.input(c);
        }
        input.move_cursor_left();
        input.move_cursor_left();
        input.input('u');
        assert_eq!(input.value(), "buye");
    }

    #[test]
    fn backspace_deletes_before_the_cursor() {
        let mut input = TaskInputState::default();
        input.open(InputPurpose::AddTask);
        for c in "abc".chars() {
            input.input(c);
        }
        input.delete_char();
        assert_eq!(input.value(), "ab");

        // At the start of the line there is nothing to delete
        input.move_cursor_left();
        input.move_cursor_left();
        input.delete_char();
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn cursor_stops_at_the_line_end() {
        let mut input = TaskInputState::default();
        input.open(InputPurpose::AddTask);
        input.input('a');
        input.move_cursor_right();
        input.move_cursor_right();
        input.input('b');
        assert_eq!(input.value(), "ab");
    }
}
