//! Temporary SQLite datasets shared by the report integration tests.
#![allow(dead_code)]

use rusqlite::Connection;
use surplus::report::{QueryResult, ReportEngine, Value};
use surplus::store::{schema, DatasetStore};
use tempfile::TempDir;

/// A dataset on disk. Dropping it removes the file.
pub struct Fixture {
    pub dir: TempDir,
    pub engine: ReportEngine,
}

impl Fixture {
    pub fn path(&self) -> std::path::PathBuf {
        self.engine.store().path().to_path_buf()
    }

    /// Execute raw SQL against the fixture and materialize it like the engine does.
    pub fn query(&self, sql: &str, params: &[String]) -> QueryResult {
        let conn = Connection::open(self.path()).unwrap();
        let mut stmt = conn.prepare(sql).unwrap();
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = names.len();
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<Result<Vec<_>, _>>()
            })
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        QueryResult::new(names, rows)
    }
}

/// Create the tables and run `seed` against them.
pub fn dataset(seed: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("food_wastage.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(schema::CREATE_TABLES).unwrap();
    conn.execute_batch(seed).unwrap();
    drop(conn);

    Fixture {
        dir,
        engine: ReportEngine::new(DatasetStore::new(path)),
    }
}

/// Three providers, three receivers, five listings and six claims.
///
/// Quantities by provider type: Bakery 40, Grocery Store 40, Restaurant 8.
/// Claim statuses: Completed 4, Pending 1, Cancelled 1.
pub const SAMPLE: &str = r#"
INSERT INTO "Providers" ("Provider_ID", "Name", "Type", "City", "Contact") VALUES
    (1, 'Green Grocer', 'Grocery Store', 'Austin', '555-0100'),
    (2, 'Bread Box', 'Bakery', 'Dallas', '555-0101'),
    (3, 'Austin Harvest', 'Restaurant', 'Austin', '555-0102');

INSERT INTO "Receivers" ("Receiver_ID", "Name", "Type", "City", "Contact") VALUES
    (1, 'Food Bank', 'NGO', 'Austin', '555-0200'),
    (2, 'Shelter Home', 'Shelter', 'Dallas', '555-0201'),
    (3, 'Community Kitchen', 'Charity', 'Houston', '555-0202');

INSERT INTO "Food_Listings" ("Food_ID", "Food_Name", "Quantity", "Provider_ID", "Provider_Type", "Location", "Food_Type", "Meal_Type") VALUES
    (1, 'Bread', 10, 2, 'Bakery', 'Dallas', 'Vegetarian', 'Breakfast'),
    (2, 'Apples', 25, 1, 'Grocery Store', 'Austin', 'Vegan', 'Snacks'),
    (3, 'Soup', 8, 3, 'Restaurant', 'Austin', 'Vegetarian', 'Dinner'),
    (4, 'Chicken', 15, 1, 'Grocery Store', 'Austin', 'Non-Vegetarian', 'Lunch'),
    (5, 'Rice', 30, 2, 'Bakery', 'Dallas', 'Vegan', 'Lunch');

INSERT INTO "Claims" ("Claim_ID", "Food_ID", "Receiver_ID", "Status") VALUES
    (1, 1, 1, 'Completed'),
    (2, 2, 1, 'Completed'),
    (3, 3, 2, 'Pending'),
    (4, 5, 3, 'Completed'),
    (5, 4, 2, 'Cancelled'),
    (6, 2, 3, 'Completed');
"#;

pub fn sample() -> Fixture {
    dataset(SAMPLE)
}

/// Rows of `result` restricted to the named columns, sorted for
/// order-independent comparison.
pub fn sorted_rows(result: &QueryResult, columns: &[&str]) -> Vec<Vec<Value>> {
    let indexes: Vec<usize> = columns
        .iter()
        .map(|c| result.column_index(c).unwrap_or_else(|| panic!("no column {c}")))
        .collect();
    let mut rows: Vec<Vec<Value>> = result
        .rows
        .iter()
        .map(|row| indexes.iter().map(|&i| row[i].clone()).collect())
        .collect();
    rows.sort_by_key(|row| format!("{:?}", row));
    rows
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn int(n: i64) -> Value {
    Value::Integer(n)
}

pub fn real(f: f64) -> Value {
    Value::Real(f)
}
