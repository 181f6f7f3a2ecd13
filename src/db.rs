// MIT License
// Copyright (c) 2024 Graham King

use rusqlite::params;
use tracing::debug;

use crate::source::Record;
use crate::tag::Tag;

// Tag columns must stay in `Tag::ALL` order, insert_message binds them positionally.
// motivational has no default so every insert has to say which side it's on.
pub const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT NOT NULL,
    motivational INTEGER NOT NULL,
    inspirational INTEGER DEFAULT 0,
    funny INTEGER DEFAULT 0,
    quote INTEGER DEFAULT 0,
    philosophical INTEGER DEFAULT 0,
    daily_affirmation INTEGER DEFAULT 0,
    harsh_truth INTEGER DEFAULT 0,
    workplace INTEGER DEFAULT 0,
    personal_growth INTEGER DEFAULT 0,
    existential INTEGER DEFAULT 0,
    complimentary INTEGER DEFAULT 0
)
"#;

const INSERT_MESSAGE: &str = r#"
INSERT INTO messages (
    message, motivational, inspirational, funny, quote, philosophical,
    daily_affirmation, harsh_truth, workplace, personal_growth,
    existential, complimentary
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub motivational: usize,
    pub demotivational: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.motivational + self.demotivational
    }
}

/// Create the messages table if it isn't there. An existing table is left as is.
pub fn create_schema(db_conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    db_conn.execute(CREATE_MESSAGES_TABLE, ())?;
    Ok(())
}

/// Delete every row. Returns how many went.
pub fn clear_messages(db_conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
    let removed = db_conn.execute("DELETE FROM messages", ())?;
    debug!(removed, "cleared messages table");
    Ok(removed)
}

/// Insert one message, returning the new row id
pub fn insert_message(db_conn: &rusqlite::Connection, record: &Record) -> rusqlite::Result<i64> {
    let v = record.tags.values();
    let mut stmt = db_conn.prepare_cached(INSERT_MESSAGE)?;
    let id = stmt.insert(params![
        record.message,
        v[0],
        v[1],
        v[2],
        v[3],
        v[4],
        v[5],
        v[6],
        v[7],
        v[8],
        v[9],
        v[10],
    ])?;
    debug!(
        id,
        motivational = record.tags.contains(Tag::Motivational),
        "inserted message"
    );
    Ok(id)
}

pub fn summarize(db_conn: &rusqlite::Connection) -> rusqlite::Result<Summary> {
    let sql = format!(
        "SELECT COUNT(*) FROM messages WHERE {} = ?1",
        Tag::Motivational.column()
    );
    let mut stmt = db_conn.prepare(&sql)?;
    let motivational: usize = stmt.query_row([1], |row| row.get(0))?;
    let demotivational: usize = stmt.query_row([0], |row| row.get(0))?;
    Ok(Summary {
        motivational,
        demotivational,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagSet;

    fn new_db() -> rusqlite::Connection {
        let db_conn = rusqlite::Connection::open_in_memory().unwrap();
        create_schema(&db_conn).unwrap();
        db_conn
    }

    fn record(message: &str, tags: &[&str]) -> Record {
        Record {
            message: message.to_string(),
            tags: TagSet::from_names(tags.iter().copied()),
        }
    }

    fn load_flags(db_conn: &rusqlite::Connection, id: i64) -> Vec<i64> {
        let cols: Vec<&str> = Tag::ALL.iter().map(|t| t.column()).collect();
        let sql = format!("SELECT {} FROM messages WHERE id = ?1", cols.join(", "));
        db_conn
            .query_row(&sql, [id], |row| {
                (0..cols.len()).map(|i| row.get(i)).collect()
            })
            .unwrap()
    }

    #[test]
    fn test_columns_match_tag_order() {
        let db_conn = new_db();
        let mut stmt = db_conn
            .prepare("SELECT name FROM pragma_table_info('messages') ORDER BY cid")
            .unwrap();
        let names: Vec<String> = stmt
            .query_map((), |row| row.get(0))
            .unwrap()
            .map(|x| x.unwrap())
            .collect();
        let mut expected = vec!["id".to_string(), "message".to_string()];
        expected.extend(Tag::ALL.iter().map(|t| t.column().to_string()));
        assert_eq!(names, expected);
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let db_conn = new_db();
        insert_message(&db_conn, &record("still here", &[])).unwrap();
        create_schema(&db_conn).unwrap();
        assert_eq!(summarize(&db_conn).unwrap().total(), 1);
    }

    #[test]
    fn test_insert_maps_tags_to_columns() {
        let db_conn = new_db();
        let id = insert_message(&db_conn, &record("Keep going.", &["motivational", "funny"])).unwrap();
        assert_eq!(load_flags(&db_conn, id), vec![1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]);

        let id = insert_message(&db_conn, &record("Untagged", &[])).unwrap();
        assert_eq!(load_flags(&db_conn, id), vec![0; 11]);

        let id = insert_message(&db_conn, &record("Odd", &["nonexistent_tag", "existential"])).unwrap();
        assert_eq!(load_flags(&db_conn, id), vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_message_is_stored_verbatim() {
        let db_conn = new_db();
        let tricky = "Robert'); DROP TABLE messages;-- \"quoted\" \n ünïcode";
        let id = insert_message(&db_conn, &record(tricky, &[])).unwrap();
        let stored: String = db_conn
            .query_row("SELECT message FROM messages WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(stored, tricky);
    }

    #[test]
    fn test_clear_and_summarize() {
        let db_conn = new_db();
        insert_message(&db_conn, &record("Keep going.", &["motivational"])).unwrap();
        insert_message(&db_conn, &record("Nothing matters.", &[])).unwrap();
        insert_message(&db_conn, &record("Shrug.", &["harsh_truth"])).unwrap();

        let summary = summarize(&db_conn).unwrap();
        assert_eq!(summary.motivational, 1);
        assert_eq!(summary.demotivational, 2);
        assert_eq!(summary.total(), 3);

        assert_eq!(clear_messages(&db_conn).unwrap(), 3);
        assert_eq!(summarize(&db_conn).unwrap().total(), 0);
    }
}
