// MIT License
// Copyright (c) 2024 Graham King

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::db;
use crate::error::PopulateError;
use crate::source::{self, Entry, Record};

#[derive(Debug)]
pub struct Report {
    pub inserted: usize,
    pub failed: usize,
    pub summary: db::Summary,
}

/// Replace the contents of the messages table with the messages in `source_path`.
///
/// The source is fully parsed before the database is opened, so a missing or
/// broken file leaves the database alone. Schema, clear and inserts share one
/// transaction. A message that can't be inserted is reported to `out` and skipped.
pub fn run(
    source_path: &Path,
    db_path: &Path,
    out: &mut dyn io::Write,
) -> Result<Report, PopulateError> {
    let entries = source::load(source_path)?;
    info!(
        count = entries.len(),
        source = %source_path.display(),
        "loaded messages"
    );

    let mut db_conn = rusqlite::Connection::open(db_path)?;
    let tx = db_conn.transaction()?;

    db::create_schema(&tx)?;
    writeln!(out, "Database schema created/verified.")?;

    db::clear_messages(&tx)?;
    writeln!(out, "Cleared existing messages from database.")?;

    let mut inserted = 0;
    let mut failed = 0;
    for entry in &entries {
        match insert_entry(&tx, entry) {
            Ok(_) => inserted += 1,
            Err(PopulateError::RecordInsert { label, reason }) => {
                warn!(%label, %reason, "skipping message");
                writeln!(out, "Error inserting message '{label}': {reason}")?;
                failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    tx.commit()?;
    writeln!(out, "Successfully inserted {inserted} messages into the database.")?;

    let summary = db::summarize(&db_conn)?;
    // Show where it went, the default is relative to wherever we were run from
    let full_path = fs::canonicalize(db_path).unwrap_or_else(|_| db_path.to_path_buf());
    writeln!(out, "Database summary:")?;
    writeln!(out, "  - Motivational messages: {}", summary.motivational)?;
    writeln!(out, "  - Demotivational messages: {}", summary.demotivational)?;
    writeln!(out, "  - Total messages: {}", summary.total())?;
    writeln!(out, "Database file: {}", full_path.display())?;

    Ok(Report {
        inserted,
        failed,
        summary,
    })
}

// Any failure here only costs us this one message
fn insert_entry(db_conn: &rusqlite::Connection, entry: &Entry) -> Result<i64, PopulateError> {
    let record = Record::try_from(entry)?;
    db::insert_message(db_conn, &record)
        .map_err(|err| PopulateError::record(&entry.label(), err.to_string()))
}
