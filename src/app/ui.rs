use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{prelude::*, widgets::*};
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::error;

use crate::app::error::{AppError, AppResult};
use crate::app::filter_form::{get_filter_form_ui, FilterFormState};
use crate::app::person_list::*;
use crate::app::storage::Storage;
use crate::app::task_input::{get_task_input_ui, InputPurpose, TaskInputState};
use crate::app::task_list::*;

#[derive(Clone, Copy, PartialEq)]
pub enum Screen {
    Tasks,
    People,
}

pub struct App<'a> {
    pub screen: Screen,
    pub tasks: TaskList<'a>,
    pub task_input: TaskInputState,
    pub people: PersonList<'a>,
    pub filter_form: FilterFormState,
    // An active warning blocks all other input, like a message box
    pub warning: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage) -> AppResult<App<'a>> {
        Ok(App {
            screen: Screen::Tasks,
            tasks: TaskList::with_items_from_storage(storage)?,
            task_input: TaskInputState::default(),
            people: PersonList::with_items_from_storage(storage)?,
            filter_form: FilterFormState::default(),
            warning: None,
        })
    }

    fn warn(&mut self, message: &str) {
        self.warning = Some(message.to_string());
    }

    // Surface a storage failure as a blocking dialog
    fn report_error(&mut self, err: AppError) {
        error!(target: "ui", "{err}");
        self.warning = Some(format!("Database error: {err}"));
    }

    fn refresh_tasks(&mut self) {
        let result = self.tasks.refresh();
        if let Err(err) = result {
            self.report_error(err);
        }
    }

    fn delete_selected_task(&mut self) {
        match self.tasks.delete_selected() {
            Ok(true) => {}
            Ok(false) => self.warn("Select a task to delete."),
            Err(err) => self.report_error(err),
        }
    }

    // Runs when Enter is pressed in the task input line.
    // Empty input is rejected with a warning and the line stays open.
    fn commit_task_input(&mut self) {
        let text = self.task_input.value().trim().to_string();
        if text.is_empty() {
            match self.task_input.purpose {
                InputPurpose::AddTask => self.warn("Enter a task to add."),
                InputPurpose::SearchTasks => self.warn("Enter text to search."),
            }
            return;
        }

        let result = match self.task_input.purpose {
            InputPurpose::AddTask => self.tasks.add(&text),
            InputPurpose::SearchTasks => self.tasks.search(&text),
        };
        if let Err(err) = result {
            self.report_error(err);
            return;
        }
        self.task_input.close();
    }

    // Runs when Enter is pressed in the filter form
    fn apply_filter_form(&mut self) {
        let query = self.filter_form.take_query();
        self.people.apply_filter(&query);
        self.filter_form.close();
    }

    fn reload_people(&mut self) {
        let result = self.people.reload();
        if let Err(err) = result {
            self.report_error(err);
        }
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> io::Result<()> {
    let last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw_ui(f, &mut app))?;
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.warning.is_some() {
                        // The warning dialog blocks everything until dismissed
                        match key.code {
                            KeyCode::Enter | KeyCode::Esc => app.warning = None,
                            _ => {}
                        }
                    } else if app.task_input.active {
                        // Handle input for the one-line task input
                        match key.code {
                            KeyCode::Esc => app.task_input.close(),
                            KeyCode::Enter => app.commit_task_input(),
                            KeyCode::Left => app.task_input.move_cursor_left(),
                            KeyCode::Right => app.task_input.move_cursor_right(),
                            KeyCode::Backspace => app.task_input.delete_char(),
                            KeyCode::Char(to_insert) => app.task_input.input(to_insert),
                            _ => {}
                        }
                    } else if app.filter_form.active {
                        // Handle input for the person filter form
                        match key.code {
                            KeyCode::Esc => app.filter_form.close(),
                            KeyCode::Enter => app.apply_filter_form(),
                            KeyCode::Down => app.filter_form.move_cursor_down(),
                            KeyCode::Up => app.filter_form.move_cursor_up(),
                            KeyCode::Left => app.filter_form.move_cursor_left(),
                            KeyCode::Right => app.filter_form.move_cursor_right(),
                            KeyCode::Backspace => app.filter_form.delete_char(),
                            KeyCode::Char(to_insert) => app.filter_form.input(to_insert),
                            _ => {}
                        }
                    } else {
                        // Handle input for list navigation and screen actions
                        match app.screen {
                            Screen::Tasks => match key.code {
                                KeyCode::Char('q') => return Ok(()),
                                KeyCode::Tab => app.screen = Screen::People,
                                KeyCode::Char('a') => app.task_input.open(InputPurpose::AddTask),
                                KeyCode::Char('s') => {
                                    app.task_input.open(InputPurpose::SearchTasks)
                                }
                                KeyCode::Char('r') => app.refresh_tasks(),
                                KeyCode::Char('x') => app.delete_selected_task(),
                                KeyCode::Down => app.tasks.next(),
                                KeyCode::Up => app.tasks.previous(),
                                KeyCode::Left => app.tasks.unselect(),
                                _ => {}
                            },
                            Screen::People => match key.code {
                                KeyCode::Char('q') => return Ok(()),
                                KeyCode::Tab => app.screen = Screen::Tasks,
                                KeyCode::Char('f') => app.filter_form.open(),
                                KeyCode::Char('s') => app.people.sort_results(),
                                KeyCode::Char('c') => app.people.cycle_sort_key(),
                                KeyCode::Char('r') => app.reload_people(),
                                KeyCode::Down => app.people.next(),
                                KeyCode::Up => app.people.previous(),
                                KeyCode::Left => app.people.unselect(),
                                _ => {}
                            },
                        }
                    }
                }
            }
        }
    }
}

// Draws the whole user interface
fn draw_ui(f: &mut Frame, app: &mut App) {
    // Create two chunks of screen in 60-40 ratio
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(f.size());

    match app.screen {
        Screen::Tasks => draw_tasks_screen(f, app, chunks[0], chunks[1]),
        Screen::People => draw_people_screen(f, app, chunks[0], chunks[1]),
    }

    if let Some(message) = app.warning.clone() {
        draw_warning_modal(f, &message);
    }
}

fn draw_tasks_screen(f: &mut Frame, app: &mut App, left: Rect, right: Rect) {
    // Create a List from all tasks and highlight the currently selected one
    let task_list = List::new(get_task_items_ui(app.tasks.items.as_slice()))
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(task_list, left, &mut app.tasks.state);

    if app.task_input.active {
        let input = Paragraph::new(get_task_input_ui(app))
            .block(Block::new().title("Add/Search Task").borders(Borders::ALL))
            .style(Style::new().white());

        f.render_widget(input, right);
    } else {
        draw_info_boxes(
            f,
            right,
            get_task_instructions_ui(),
            get_task_statistics_ui(app),
        );
    }
}

fn draw_people_screen(f: &mut Frame, app: &mut App, left: Rect, right: Rect) {
    let person_list = List::new(get_person_items_ui(app.people.results.as_slice()))
        .block(Block::default().borders(Borders::ALL).title("Records"))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(person_list, left, &mut app.people.state);

    if app.filter_form.active {
        let form = Paragraph::new(get_filter_form_ui(app))
            .block(Block::new().title("Filter Records").borders(Borders::ALL))
            .style(Style::new().white());

        f.render_widget(form, right);
    } else {
        draw_info_boxes(
            f,
            right,
            get_person_instructions_ui(),
            get_person_statistics_ui(app),
        );
    }
}

// Display instructions and status in a vertically split layout
fn draw_info_boxes(f: &mut Frame, area: Rect, instructions: Vec<Line>, statistics: Vec<Line>) {
    let right_side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let instructions = Paragraph::new(instructions)
        .block(Block::new().title("Commands").borders(Borders::ALL))
        .style(Style::new().white());

    let statistics = Paragraph::new(statistics)
        .block(Block::new().title("Status").borders(Borders::ALL))
        .style(Style::new().white());

    f.render_widget(instructions, right_side[0]);
    f.render_widget(statistics, right_side[1]);
}

// A blocking warning dialog over the rest of the UI
fn draw_warning_modal(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 25, f.size());
    let dialog = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::raw(""),
        Line::from("Enter - OK"),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Warning"))
    .style(Style::new().white());

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

// A centered rect taking the given percentages of the outer one
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::filter::SortKey;
    use rusqlite::Connection;

    fn setup_storage() -> Storage {
        let storage = Storage {
            db_con: Connection::open_in_memory().unwrap(),
        };
        storage.create_tables_if_not_exist().unwrap();
        storage.seed_people_if_empty().unwrap();
        storage
    }

    #[test]
    fn empty_add_input_raises_a_warning_and_stays_open() {
        let storage = setup_storage();
        let mut app = App::new(&storage).unwrap();

        app.task_input.open(InputPurpose::AddTask);
        app.task_input.input(' ');
        app.commit_task_input();

        assert_eq!(app.warning.as_deref(), Some("Enter a task to add."));
        assert!(app.task_input.active);
        assert!(app.tasks.items.is_empty());
    }

    #[test]
    fn empty_search_input_raises_a_warning() {
        let storage = setup_storage();
        let mut app = App::new(&storage).unwrap();

        app.task_input.open(InputPurpose::SearchTasks);
        app.commit_task_input();

        assert_eq!(app.warning.as_deref(), Some("Enter text to search."));
    }

    #[test]
    fn committed_input_adds_the_task_and_closes_the_line() {
        let storage = setup_storage();
        let mut app = App::new(&storage).unwrap();

        app.task_input.open(InputPurpose::AddTask);
        for c in "Water plants".chars() {
            app.task_input.input(c);
        }
        app.commit_task_input();

        assert!(app.warning.is_none());
        assert!(!app.task_input.active);
        assert_eq!(app.tasks.items.len(), 1);
        assert_eq!(app.tasks.items[0].title, "Water plants");
    }

    #[test]
    fn deleting_without_a_selection_raises_a_warning() {
        let storage = setup_storage();
        storage.insert_task("Buy milk").unwrap();
        let mut app = App::new(&storage).unwrap();

        app.delete_selected_task();
        assert_eq!(app.warning.as_deref(), Some("Select a task to delete."));
        assert_eq!(app.tasks.items.len(), 1);
    }

    #[test]
    fn filter_form_commit_narrows_the_people_results() {
        let storage = setup_storage();
        let mut app = App::new(&storage).unwrap();

        app.filter_form.open();
        app.filter_form.move_cursor_down();
        app.filter_form.move_cursor_down();
        for c in "portland".chars() {
            app.filter_form.input(c);
        }
        app.apply_filter_form();

        assert!(!app.filter_form.active);
        assert_eq!(app.people.results.len(), 2);

        app.people.cycle_sort_key();
        assert_eq!(app.people.sort_key, SortKey::ByAge);
    }
}
