pub struct Task {
    pub id: Option<i64>,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub city: String,
}

impl Person {
    // Text of a single results-list row
    pub fn display_line(&self) -> String {
        return format!("{}, {}, {}", self.name, self.age, self.city);
    }
}
