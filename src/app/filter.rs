// In-memory filtering and sorting of person records.
// Predicates are applied one after another; an empty form field
// contributes no predicate at all.
use tracing::{info, warn};

use crate::app::models::Person;
use crate::app::timing::OpTimer;

#[derive(Debug, Default, PartialEq)]
pub struct PersonQuery {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub city: Option<String>,
}

impl PersonQuery {
    // Build a query from raw form input. Name and city are trimmed;
    // the age predicate only applies when the input is all digits.
    pub fn from_inputs(name: &str, age: &str, city: &str) -> PersonQuery {
        PersonQuery {
            name: non_empty(name),
            age: parse_age(age),
            city: non_empty(city),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.city.is_none()
    }
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// Digit check before parsing; anything else means no age predicate
fn parse_age(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        info!(target: "people", input = trimmed, "ignoring non-numeric age input");
        return None;
    }
    trimmed.parse::<i64>().ok()
}

pub fn filter_people(people: &[Person], query: &PersonQuery) -> Vec<Person> {
    let _timer = OpTimer::start("filter_people");
    let mut results: Vec<Person> = people.to_vec();
    if query.is_empty() {
        info!(target: "people", matched = results.len(), "empty filter, showing everything");
        return results;
    }

    if let Some(name) = &query.name {
        let needle = name.to_lowercase();
        results.retain(|person| person.name.to_lowercase().contains(&needle));
    }
    if let Some(age) = query.age {
        results.retain(|person| person.age == age);
    }
    if let Some(city) = &query.city {
        let needle = city.to_lowercase();
        results.retain(|person| person.city.to_lowercase().contains(&needle));
    }

    info!(target: "people", matched = results.len(), "filter applied");
    return results;
}

// Possible result sorting keys
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortKey {
    ByName,
    ByAge,
    ByCity,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::ByName => "name",
            SortKey::ByAge => "age",
            SortKey::ByCity => "city",
        }
    }

    // The next key in the selector order
    pub fn next(&self) -> SortKey {
        match self {
            SortKey::ByName => SortKey::ByAge,
            SortKey::ByAge => SortKey::ByCity,
            SortKey::ByCity => SortKey::ByName,
        }
    }
}

// Sort the results by the given key, ascending. The sort is stable,
// so rows with equal keys keep their current order.
pub fn sort_people(results: &mut [Person], key: SortKey) {
    let _timer = OpTimer::start("sort_people");
    if results.is_empty() {
        warn!(target: "people", "attempted to sort an empty result list");
        return;
    }
    match key {
        SortKey::ByName => results.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::ByAge => results.sort_by(|a, b| a.age.cmp(&b.age)),
        SortKey::ByCity => results.sort_by(|a, b| a.city.cmp(&b.city)),
    }
    info!(target: "people", key = key.label(), "results sorted");
}
