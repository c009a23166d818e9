use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::*;
use tracing::info;

use crate::app::error::AppResult;
use crate::app::models::Task;
use crate::app::storage::Storage;

use super::ui::App;

pub struct TaskList<'a> {
    pub state: ListState,
    pub items: Vec<Task>,
    pub last_search: Option<String>,
    pub total: i64,
    storage: &'a Storage,
}

impl<'a> TaskList<'a> {
    // Initialize a task list with items from the database
    pub fn with_items_from_storage(storage: &'a Storage) -> AppResult<TaskList<'a>> {
        let mut list = TaskList {
            state: ListState::default(),
            items: Vec::new(),
            last_search: None,
            total: 0,
            storage,
        };
        list.refresh()?;
        Ok(list)
    }

    // Show every task again and forget the active search
    pub fn refresh(&mut self) -> AppResult<()> {
        self.items = self.storage.get_all_tasks()?;
        self.total = self.storage.count_tasks()?;
        self.last_search = None;
        self.state.select(None);
        if self.items.is_empty() {
            info!(target: "tasks", "no tasks found");
        }
        Ok(())
    }

    pub fn add(&mut self, title: &str) -> AppResult<()> {
        self.storage.insert_task(title)?;
        self.refresh()
    }

    // Keep only the tasks whose title contains the given text
    pub fn search(&mut self, text: &str) -> AppResult<()> {
        self.items = self.storage.search_tasks(text)?;
        self.total = self.storage.count_tasks()?;
        self.last_search = Some(text.to_string());
        self.state.select(None);
        if self.items.is_empty() {
            info!(target: "tasks", "no tasks found");
        }
        Ok(())
    }

    // Delete the selected task from the database; false means nothing was selected
    pub fn delete_selected(&mut self) -> AppResult<bool> {
        let task_id = match self.get_selected().and_then(|task| task.id) {
            Some(id) => id,
            None => return Ok(false),
        };
        self.storage.delete_task(task_id)?;
        self.refresh()?;
        Ok(true)
    }

    // Move the selection to the next item
    pub fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if self.items.is_empty() || i >= self.items.len() - 1 {
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
                if self.items.is_empty() {
                    0
                } else if i == 0 {
                    self.items.len() - 1
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

    // Get the selected task
    pub fn get_selected(&self) -> Option<&Task> {
        match self.state.selected() {
            Some(i) => self.items.get(i),
            None => None,
        }
    }
}

// Build the UI (list) for the task list
pub fn get_task_items_ui<'a>(tasks: &'a [Task]) -> Vec<ListItem<'a>> {
    if tasks.is_empty() {
        // Placeholder row, not a real record
        return vec![ListItem::new("No tasks found.").style(Style::default().fg(Color::DarkGray))];
    }
    return tasks
        .iter()
        .map(|task| {
            ListItem::new(Line::from(task.title.as_str())).style(Style::default().fg(Color::White))
        })
        .collect();
}

// Build the UI (lines) for the task status infobox
pub fn get_task_statistics_ui<'a>(app: &'a App<'a>) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(format!("Total tasks: {}", app.tasks.total)),
        Line::from(format!("Shown: {}", app.tasks.items.len())),
    ];
    if let Some(ref text) = app.tasks.last_search {
        lines.push(Line::from(format!("Search: {}", text)));
    }
    return lines;
}

// Build the UI (lines) for the task instructions infobox
pub fn get_task_instructions_ui<'a>() -> Vec<Line<'a>> {
    return vec![
        "a - add a task".into(),
        "s - search tasks".into(),
        "r - show all tasks".into(),
        "x - delete a task".into(),
        "Up/Down - select, Left - unselect".into(),
        "Tab - people screen".into(),
        "q - quit".into(),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn setup_storage() -> Storage {
        let storage = Storage {
            db_con: Connection::open_in_memory().unwrap(),
        };
        storage.create_tables_if_not_exist().unwrap();
        storage.insert_task("Buy milk").unwrap();
        storage.insert_task("Call mom").unwrap();
        storage.insert_task("Buy stamps").unwrap();
        storage
    }

    #[test]
    fn search_then_refresh_restores_the_full_list() {
        let storage = setup_storage();
        let mut list = TaskList::with_items_from_storage(&storage).unwrap();

        list.search("buy").unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.last_search.as_deref(), Some("buy"));
        assert_eq!(list.total, 3);

        list.refresh().unwrap();
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.last_search, None);
    }

    #[test]
    fn delete_selected_removes_the_row() {
        let storage = setup_storage();
        let mut list = TaskList::with_items_from_storage(&storage).unwrap();

        list.next();
        let selected_title = list.get_selected().unwrap().title.clone();
        assert!(list.delete_selected().unwrap());
        assert_eq!(list.items.len(), 2);
        assert!(list.items.iter().all(|task| task.title != selected_title));
    }

    #[test]
    fn delete_with_no_selection_reports_false() {
        let storage = setup_storage();
        let mut list = TaskList::with_items_from_storage(&storage).unwrap();
        assert!(!list.delete_selected().unwrap());
        assert_eq!(list.items.len(), 3);
    }

    #[test]
    fn selection_wraps_around() {
        let storage = setup_storage();
        let mut list = TaskList::with_items_from_storage(&storage).unwrap();

        list.previous();
        assert_eq!(list.state.selected(), Some(0));
        list.previous();
        assert_eq!(list.state.selected(), Some(2));
        list.next();
        assert_eq!(list.state.selected(), Some(0));
        list.unselect();
        assert_eq!(list.state.selected(), None);
    }
}
