use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::*;
use tracing::info;

use crate::app::error::AppResult;
use crate::app::filter::{filter_people, sort_people, PersonQuery, SortKey};
use crate::app::models::Person;
use crate::app::storage::Storage;

use super::ui::App;

pub struct PersonList<'a> {
    pub state: ListState,
    pub all: Vec<Person>,
    pub results: Vec<Person>,
    pub sort_key: SortKey,
    storage: &'a Storage,
}

impl<'a> PersonList<'a> {
    // Initialize the list with every record from the database
    pub fn with_items_from_storage(storage: &'a Storage) -> AppResult<PersonList<'a>> {
        let all = storage.get_all_people()?;
        Ok(PersonList {
            state: ListState::default(),
            results: all.clone(),
            all,
            sort_key: SortKey::ByName,
            storage,
        })
    }

    // Re-read the table and show everything.
    // Picks up rows inserted into the table from outside the app.
    pub fn reload(&mut self) -> AppResult<()> {
        self.all = self.storage.get_all_people()?;
        self.results = self.all.clone();
        self.state.select(None);
        Ok(())
    }

    // Replace the results with the records matching the query
    pub fn apply_filter(&mut self, query: &PersonQuery) {
        self.results = filter_people(&self.all, query);
        self.state.select(None);
        if self.results.is_empty() {
            info!(target: "people", "no records found");
        }
    }

    // Sort the current results by the active key
    pub fn sort_results(&mut self) {
        sort_people(&mut self.results, self.sort_key);
    }

    pub fn cycle_sort_key(&mut self) {
        self.sort_key = self.sort_key.next();
    }

    // Move the selection to the next item
    pub fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if self.results.is_empty() || i >= self.results.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    // Move the selection to the previous item
    pub fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if self.results.is_empty() {
                    0
                } else if i == 0 {
                    self.results.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn unselect(&mut self) {
        self.state.select(None);
    }
}

// Build the UI (list) for the person results
pub fn get_person_items_ui<'a>(people: &'a [Person]) -> Vec<ListItem<'a>> {
    if people.is_empty() {
        // Placeholder row, not a real record
        return vec![
            ListItem::new("No records found.").style(Style::default().fg(Color::DarkGray)),
        ];
    }
    return people
        .iter()
        .map(|person| {
            ListItem::new(Line::from(person.display_line()))
                .style(Style::default().fg(Color::White))
        })
        .collect();
}

// Build the UI (lines) for the person status infobox
pub fn get_person_statistics_ui<'a>(app: &'a App<'a>) -> Vec<Line<'a>> {
    return vec![
        Line::from(format!("Total records: {}", app.people.all.len())),
        Line::from(format!("Shown: {}", app.people.results.len())),
        Line::from(format!("Sort key: {}", app.people.sort_key.label())),
    ];
}

// Build the UI (lines) for the person instructions infobox
pub fn get_person_instructions_ui<'a>() -> Vec<Line<'a>> {
    return vec![
        "f - filter records".into(),
        "s - sort results".into(),
        "c - change sort key".into(),
        "r - show all records".into(),
        "Up/Down - select, Left - unselect".into(),
        "Tab - task screen".into(),
        "q - quit".into(),
    ];
}
