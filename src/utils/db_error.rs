//! Classification of database errors raised by the unique indexes on `mappings`.

/// Column guarded by a unique index on the `mappings` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueColumn {
    ShortKey,
    SecretKey,
    Other,
}

impl UniqueColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueColumn::ShortKey => "short_key",
            UniqueColumn::SecretKey => "secret_key",
            UniqueColumn::Other => "unknown",
        }
    }
}

/// Returns the violated column name if `e` is a unique-constraint violation.
///
/// PostgreSQL reports the constraint name (`mappings_short_key_unique`);
/// SQLite only reports it in the message (`UNIQUE constraint failed: mappings.short_key`).
pub fn unique_violation_column(e: &sqlx::Error) -> Option<&'static str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    let source = db_err.constraint().unwrap_or_else(|| db_err.message());
    Some(classify(source).as_str())
}

fn classify(source: &str) -> UniqueColumn {
    if source.contains("short_key") {
        UniqueColumn::ShortKey
    } else if source.contains("secret_key") {
        UniqueColumn::SecretKey
    } else {
        UniqueColumn::Other
    }
}
