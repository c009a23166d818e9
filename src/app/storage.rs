// Communication with SQLite
// Philosophy of CRUD lives here
// Based on https://github.com/rusqlite/rusqlite/blob/master/examples/persons/main.rs
use rusqlite::{params, Connection};
use tracing::info;

use crate::app::error::AppResult;
use crate::app::models::{Person, Task};
use crate::app::timing::OpTimer;

// Rows for the records table, inserted once on first run
const SEED_PEOPLE: [(i64, &str, i64, &str); 5] = [
    (1, "Alice", 25, "Portland"),
    (2, "Maria", 30, "Denver"),
    (3, "Peter", 22, "Austin"),
    (4, "Anna", 28, "Boston"),
    (5, "Irene", 35, "Portland"),
];

pub struct Storage {
    pub db_con: Connection,
}

impl Storage {
    pub fn create_tables_if_not_exist(&self) -> AppResult<()> {
        self.db_con.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL
            );",
            (),
        )?;
        self.db_con.execute(
            "CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                city TEXT NOT NULL
            );",
            (),
        )?;
        Ok(())
    }

    pub fn seed_people_if_empty(&self) -> AppResult<()> {
        let count: i64 = self
            .db_con
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }
        for (id, name, age, city) in SEED_PEOPLE {
            self.db_con.execute(
                "INSERT INTO records (id, name, age, city) VALUES (?1, ?2, ?3, ?4);",
                params![id, name, age, city],
            )?;
        }
        info!(target: "storage", rows = SEED_PEOPLE.len(), "seeded the records table");
        Ok(())
    }

    // CREATE
    pub fn insert_task(&self, title: &str) -> AppResult<Task> {
        let _timer = OpTimer::start("insert_task");
        self.db_con
            .execute("INSERT INTO tasks (title) VALUES (?1);", params![title])?;
        let id = self.db_con.last_insert_rowid();
        info!(target: "storage", id, title, "task added");
        Ok(Task {
            id: Some(id),
            title: title.to_string(),
        })
    }

    // READ
    pub fn get_all_tasks(&self) -> AppResult<Vec<Task>> {
        let _timer = OpTimer::start("get_all_tasks");
        let mut stmt = self.db_con.prepare("SELECT id, title FROM tasks")?;
        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })?;
        let tasks = rows.collect::<Result<Vec<Task>, _>>()?;
        Ok(tasks)
    }

    pub fn search_tasks(&self, text: &str) -> AppResult<Vec<Task>> {
        let _timer = OpTimer::start("search_tasks");
        let mut stmt = self
            .db_con
            .prepare("SELECT id, title FROM tasks WHERE title LIKE ?1")?;
        let pattern = format!("%{}%", text);
        let rows = stmt.query_map(params![pattern], |row| {
            Ok(Task {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })?;
        let tasks = rows.collect::<Result<Vec<Task>, _>>()?;
        info!(target: "storage", text, matched = tasks.len(), "task search");
        Ok(tasks)
    }

    pub fn count_tasks(&self) -> AppResult<i64> {
        let count = self
            .db_con
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count)
    }

    // DELETE
    pub fn delete_task(&self, task_id: i64) -> AppResult<usize> {
        let _timer = OpTimer::start("delete_task");
        let deleted = self
            .db_con
            .execute("DELETE FROM tasks WHERE id = ?1;", params![task_id])?;
        info!(target: "storage", id = task_id, "task deleted");
        Ok(deleted)
    }

    pub fn get_all_people(&self) -> AppResult<Vec<Person>> {
        let _timer = OpTimer::start("get_all_people");
        let mut stmt = self
            .db_con
            .prepare("SELECT id, name, age, city FROM records ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Person {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                city: row.get(3)?,
            })
        })?;
        let people = rows.collect::<Result<Vec<Person>, _>>()?;
        Ok(people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_storage() -> Storage {
        let storage = Storage {
            db_con: Connection::open_in_memory().unwrap(),
        };
        storage.create_tables_if_not_exist().unwrap();
        storage
    }

    #[test]
    fn insert_assigns_an_id_and_lists_the_task() {
        let storage = setup_storage();
        let task = storage.insert_task("Buy milk").unwrap();
        assert!(task.id.is_some());

        let tasks = storage.get_all_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(storage.count_tasks().unwrap(), 1);
    }

    #[test]
    fn search_matches_a_title_substring() {
        let storage = setup_storage();
        storage.insert_task("Buy milk").unwrap();
        storage.insert_task("Call mom").unwrap();
        storage.insert_task("buy stamps").unwrap();

        // LIKE is case-insensitive for ASCII
        let hits = storage.search_tasks("buy").unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn search_with_no_match_returns_empty() {
        let storage = setup_storage();
        storage.insert_task("Buy milk").unwrap();
        assert!(storage.search_tasks("laundry").unwrap().is_empty());
    }

    #[test]
    fn delete_removes_only_the_given_id() {
        let storage = setup_storage();
        let first = storage.insert_task("duplicate").unwrap();
        storage.insert_task("duplicate").unwrap();

        let deleted = storage.delete_task(first.id.unwrap()).unwrap();
        assert_eq!(deleted, 1);

        let remaining = storage.get_all_tasks().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_ne!(remaining[0].id, first.id);
    }

    #[test]
    fn seed_runs_once() {
        let storage = setup_storage();
        storage.seed_people_if_empty().unwrap();
        storage.seed_people_if_empty().unwrap();

        let people = storage.get_all_people().unwrap();
        assert_eq!(people.len(), 5);
        let ids: Vec<i64> = people.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn people_come_back_ordered_by_id() {
        let storage = setup_storage();
        storage
            .db_con
            .execute(
                "INSERT INTO records (id, name, age, city) VALUES (2, 'Maria', 30, 'Denver');",
                (),
            )
            .unwrap();
        storage
            .db_con
            .execute(
                "INSERT INTO records (id, name, age, city) VALUES (1, 'Alice', 25, 'Portland');",
                (),
            )
            .unwrap();

        let people = storage.get_all_people().unwrap();
        assert_eq!(people[0].name, "Alice");
        assert_eq!(people[1].name, "Maria");
    }
}
