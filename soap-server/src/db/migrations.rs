//! Person-store schema steps, tracked in `PRAGMA user_version`.

use std::cmp::Ordering;

use log::info;
use rusqlite::Connection;

use super::{DbError, DbResult};

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "persons",
    sql: include_str!("migrations/0001_persons.sql"),
}];

pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`] and returns the version it started
/// from. Pending steps share one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    match from.cmp(&latest) {
        Ordering::Greater => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: from,
                latest_supported: latest,
            })
        }
        Ordering::Equal => return Ok(from),
        Ordering::Less => {}
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > from) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db step={} version={}",
            step.name, step.version
        );
    }
    tx.commit()?;
    Ok(from)
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}
