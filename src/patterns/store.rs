//! Pattern Storage
//! Mission: Persist patterns with SQLite, scoped to their owner

use crate::patterns::models::{Pattern, PatternStyle, UpdatePatternRequest};
use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};
use uuid::Uuid;

/// Pattern storage with SQLite backend. Every single-row operation is
/// owner-scoped; a row belonging to another user behaves as absent.
pub struct PatternStore {
    db_path: String,
}

impl PatternStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open pattern database")
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS patterns (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                ease REAL,
                gauge_row REAL,
                gauge_stitches REAL,
                style TEXT,
                chest REAL,
                waist REAL,
                hips REAL,
                upper_arm REAL,
                armhole REAL,
                length REAL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn create(&self, pattern: &Pattern) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "INSERT INTO patterns (id, user_id, name, ease, gauge_row, gauge_stitches, style,
                                   chest, waist, hips, upper_arm, armhole, length)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                pattern.id.to_string(),
                pattern.user.to_string(),
                pattern.name,
                pattern.ease,
                pattern.gauge_row,
                pattern.gauge_stitches,
                pattern.style.map(|s| s.as_str()),
                pattern.chest,
                pattern.waist,
                pattern.hips,
                pattern.upper_arm,
                pattern.armhole,
                pattern.length,
            ],
        )
        .context("Failed to insert pattern")?;

        Ok(())
    }

    pub fn list(&self, user: &Uuid) -> Result<Vec<Pattern>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {PATTERN_COLUMNS} FROM patterns WHERE user_id = ?1"
        ))?;
        let patterns = stmt
            .query_map(params![user.to_string()], row_to_pattern)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(patterns)
    }

    pub fn get(&self, user: &Uuid, id: &Uuid) -> Result<Option<Pattern>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {PATTERN_COLUMNS} FROM patterns WHERE id = ?1 AND user_id = ?2"
        ))?;
        let result = stmt.query_row(params![id.to_string(), user.to_string()], row_to_pattern);

        match result {
            Ok(pattern) => Ok(Some(pattern)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial update, returning the stored record afterwards.
    pub fn update(
        &self,
        user: &Uuid,
        id: &Uuid,
        update: UpdatePatternRequest,
    ) -> Result<Option<Pattern>> {
        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        macro_rules! push_set {
            ($field:expr, $column:literal) => {
                if let Some(v) = $field {
                    sets.push(concat!($column, " = ?"));
                    values.push(Box::new(v));
                }
            };
        }

        push_set!(update.name, "name");
        push_set!(update.ease, "ease");
        push_set!(update.gauge_row, "gauge_row");
        push_set!(update.gauge_stitches, "gauge_stitches");
        push_set!(update.style.map(|s| s.as_str().to_string()), "style");
        push_set!(update.chest, "chest");
        push_set!(update.waist, "waist");
        push_set!(update.hips, "hips");
        push_set!(update.upper_arm, "upper_arm");
        push_set!(update.armhole, "armhole");
        push_set!(update.length, "length");

        if !sets.is_empty() {
            values.push(Box::new(id.to_string()));
            values.push(Box::new(user.to_string()));
            let sql = format!(
                "UPDATE patterns SET {} WHERE id = ? AND user_id = ?",
                sets.join(", ")
            );

            let conn = self.open()?;
            conn.execute(&sql, params_from_iter(values.iter().map(|v| v.as_ref())))
                .context("Failed to update pattern")?;
        }

        self.get(user, id)
    }

    /// Delete a pattern. Returns false when no owned row matched.
    pub fn delete(&self, user: &Uuid, id: &Uuid) -> Result<bool> {
        let conn = self.open()?;

        let rows_affected = conn.execute(
            "DELETE FROM patterns WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user.to_string()],
        )?;

        Ok(rows_affected > 0)
    }
}

const PATTERN_COLUMNS: &str = "id, user_id, name, ease, gauge_row, gauge_stitches, style, \
                               chest, waist, hips, upper_arm, armhole, length";

fn row_to_pattern(row: &Row<'_>) -> rusqlite::Result<Pattern> {
    let id: String = row.get(0)?;
    let user: String = row.get(1)?;
    let style: Option<String> = row.get(6)?;

    Ok(Pattern {
        id: parse_uuid_column(0, &id)?,
        user: parse_uuid_column(1, &user)?,
        name: row.get(2)?,
        ease: row.get(3)?,
        gauge_row: row.get(4)?,
        gauge_stitches: row.get(5)?,
        style: style.as_deref().and_then(PatternStyle::from_str),
        chest: row.get(7)?,
        waist: row.get(8)?,
        hips: row.get(9)?,
        upper_arm: row.get(10)?,
        armhole: row.get(11)?,
        length: row.get(12)?,
    })
}

pub(crate) fn parse_uuid_column(index: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}
