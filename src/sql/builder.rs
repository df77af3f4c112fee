//! Builds the parameterized SELECT, INSERT, UPDATE, DELETE statements for the trains table.

/// Table name; the schema is configurable.
pub const TRAINS_TABLE: &str = "trains";

/// How a column is stored and bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Date,
    Time,
}

/// Business columns in bind order ($1..$6). `id` is handled separately.
pub const BUSINESS_COLUMNS: [(&str, ColumnKind); 6] = [
    ("train_date", ColumnKind::Date),
    ("platform", ColumnKind::Integer),
    ("start_point", ColumnKind::Text),
    ("end_point", ColumnKind::Text),
    ("arrival_time", ColumnKind::Time),
    ("departure_time", ColumnKind::Time),
];

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// SELECT list: `id` and `platform` as-is, every other column as `col::text` so
/// rows decode into strings whether the column is TEXT, DATE or TIME.
fn select_column_list() -> String {
    let mut cols = vec![quoted("id")];
    for (name, kind) in BUSINESS_COLUMNS {
        let q = quoted(name);
        cols.push(match kind {
            ColumnKind::Integer => q,
            _ => format!("{}::text AS {}", q, q),
        });
    }
    cols.join(", ")
}

/// Every statement the store issues, rendered once for a given schema.
#[derive(Clone, Debug)]
pub struct TrainStatements {
    pub select_all: String,
    pub select_by_id: String,
    pub select_by_platform: String,
    pub select_by_end_point: String,
    pub insert: String,
    pub lock_id: String,
    pub lock_row: String,
    pub update: String,
    pub delete: String,
    pub create_table: String,
}

impl TrainStatements {
    /// `temporal_casts` makes date and time placeholders `$n::date` / `$n::time`,
    /// for tables whose columns are typed DATE/TIME rather than TEXT.
    pub fn new(schema: &str, temporal_casts: bool) -> Self {
        let table = qualified_table(schema, TRAINS_TABLE);
        let cols = select_column_list();
        let id = quoted("id");

        let placeholder = |n: usize, kind: ColumnKind| match (temporal_casts, kind) {
            (true, ColumnKind::Date) => format!("${}::date", n),
            (true, ColumnKind::Time) => format!("${}::time", n),
            _ => format!("${}", n),
        };

        let names: Vec<String> = BUSINESS_COLUMNS.iter().map(|(name, _)| quoted(name)).collect();
        let values: Vec<String> = BUSINESS_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (_, kind))| placeholder(i + 1, *kind))
            .collect();
        let sets: Vec<String> = names
            .iter()
            .zip(values.iter())
            .map(|(name, value)| format!("{} = {}", name, value))
            .collect();
        let id_param = BUSINESS_COLUMNS.len() + 1;

        let column_defs: Vec<String> = BUSINESS_COLUMNS
            .iter()
            .map(|(name, kind)| {
                let typ = match kind {
                    ColumnKind::Integer => "INTEGER",
                    _ => "TEXT",
                };
                format!("{} {} NOT NULL", quoted(name), typ)
            })
            .collect();

        TrainStatements {
            select_all: format!("SELECT {} FROM {} ORDER BY {}", cols, table, id),
            select_by_id: format!("SELECT {} FROM {} WHERE {} = $1", cols, table, id),
            select_by_platform: format!(
                "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
                cols,
                table,
                quoted("platform"),
                id
            ),
            select_by_end_point: format!(
                "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
                cols,
                table,
                quoted("end_point"),
                id
            ),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
                table,
                names.join(", "),
                values.join(", "),
                cols
            ),
            lock_id: format!("SELECT {} FROM {} WHERE {} = $1 FOR UPDATE", id, table, id),
            lock_row: format!("SELECT {} FROM {} WHERE {} = $1 FOR UPDATE", cols, table, id),
            update: format!(
                "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
                table,
                sets.join(", "),
                id,
                id_param,
                cols
            ),
            delete: format!("DELETE FROM {} WHERE {} = $1", table, id),
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {} ({} SERIAL PRIMARY KEY, {})",
                table,
                id,
                column_defs.join(", ")
            ),
        }
    }
}
