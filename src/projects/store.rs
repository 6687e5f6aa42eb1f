//! Project Storage
//! Mission: Persist projects with SQLite, scoped to their owner

use crate::patterns::store::parse_uuid_column;
use crate::projects::models::{Project, UpdateProjectRequest};
use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};
use uuid::Uuid;

/// Project storage with SQLite backend. Image lists are stored as JSON
/// text in a single column.
pub struct ProjectStore {
    db_path: String,
}

impl ProjectStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open project database")
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                pattern_id TEXT,
                name TEXT NOT NULL,
                created TEXT NOT NULL,
                images TEXT NOT NULL DEFAULT '[]',
                size TEXT,
                needles TEXT,
                notes TEXT,
                ease REAL,
                gauge_row REAL,
                gauge_stitches REAL,
                chest REAL,
                waist REAL,
                hips REAL,
                upper_arm REAL,
                armhole REAL,
                yoke_depth REAL,
                raglan_depth REAL,
                length REAL,
                wrist REAL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn create(&self, project: &Project) -> Result<()> {
        let conn = self.open()?;

        let images =
            serde_json::to_string(&project.images).context("Failed to encode image list")?;

        conn.execute(
            "INSERT INTO projects (id, user_id, pattern_id, name, created, images, size,
                                   needles, notes, ease, gauge_row, gauge_stitches, chest,
                                   waist, hips, upper_arm, armhole, yoke_depth, raglan_depth,
                                   length, wrist)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21)",
            params![
                project.id.to_string(),
                project.user.to_string(),
                project.pattern.map(|p| p.to_string()),
                project.name,
                project.created,
                images,
                project.size,
                project.needles,
                project.notes,
                project.ease,
                project.gauge_row,
                project.gauge_stitches,
                project.chest,
                project.waist,
                project.hips,
                project.upper_arm,
                project.armhole,
                project.yoke_depth,
                project.raglan_depth,
                project.length,
                project.wrist,
            ],
        )
        .context("Failed to insert project")?;

        Ok(())
    }

    pub fn list(&self, user: &Uuid) -> Result<Vec<Project>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = ?1"
        ))?;
        let projects = stmt
            .query_map(params![user.to_string()], row_to_project)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    pub fn get(&self, user: &Uuid, id: &Uuid) -> Result<Option<Project>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1 AND user_id = ?2"
        ))?;
        let result = stmt.query_row(params![id.to_string(), user.to_string()], row_to_project);

        match result {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial update, returning the stored record afterwards.
    pub fn update(
        &self,
        user: &Uuid,
        id: &Uuid,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
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
        push_set!(update.pattern.map(|p| p.to_string()), "pattern_id");
        if let Some(images) = &update.images {
            sets.push("images = ?");
            let encoded =
                serde_json::to_string(images).context("Failed to encode image list")?;
            values.push(Box::new(encoded));
        }
        push_set!(update.size, "size");
        push_set!(update.needles, "needles");
        push_set!(update.notes, "notes");
        push_set!(update.ease, "ease");
        push_set!(update.gauge_row, "gauge_row");
        push_set!(update.gauge_stitches, "gauge_stitches");
        push_set!(update.chest, "chest");
        push_set!(update.waist, "waist");
        push_set!(update.hips, "hips");
        push_set!(update.upper_arm, "upper_arm");
        push_set!(update.armhole, "armhole");
        push_set!(update.yoke_depth, "yoke_depth");
        push_set!(update.raglan_depth, "raglan_depth");
        push_set!(update.length, "length");
        push_set!(update.wrist, "wrist");

        if !sets.is_empty() {
            values.push(Box::new(id.to_string()));
            values.push(Box::new(user.to_string()));
            let sql = format!(
                "UPDATE projects SET {} WHERE id = ? AND user_id = ?",
                sets.join(", ")
            );

            let conn = self.open()?;
            conn.execute(&sql, params_from_iter(values.iter().map(|v| v.as_ref())))
                .context("Failed to update project")?;
        }

        self.get(user, id)
    }

    /// Delete a project. Returns false when no owned row matched.
    pub fn delete(&self, user: &Uuid, id: &Uuid) -> Result<bool> {
        let conn = self.open()?;

        let rows_affected = conn.execute(
            "DELETE FROM projects WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user.to_string()],
        )?;

        Ok(rows_affected > 0)
    }
}

const PROJECT_COLUMNS: &str = "id, user_id, pattern_id, name, created, images, size, needles, \
                               notes, ease, gauge_row, gauge_stitches, chest, waist, hips, \
                               upper_arm, armhole, yoke_depth, raglan_depth, length, wrist";

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    let id: String = row.get(0)?;
    let user: String = row.get(1)?;
    let pattern: Option<String> = row.get(2)?;
    let images: String = row.get(5)?;

    let pattern = match pattern {
        Some(p) => Some(parse_uuid_column(2, &p)?),
        None => None,
    };
    let images: Vec<String> = serde_json::from_str(&images).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Project {
        id: parse_uuid_column(0, &id)?,
        user: parse_uuid_column(1, &user)?,
        pattern,
        name: row.get(3)?,
        created: row.get(4)?,
        images,
        size: row.get(6)?,
        needles: row.get(7)?,
        notes: row.get(8)?,
        ease: row.get(9)?,
        gauge_row: row.get(10)?,
        gauge_stitches: row.get(11)?,
        chest: row.get(12)?,
        waist: row.get(13)?,
        hips: row.get(14)?,
        upper_arm: row.get(15)?,
        armhole: row.get(16)?,
        yoke_depth: row.get(17)?,
        raglan_depth: row.get(18)?,
        length: row.get(19)?,
        wrist: row.get(20)?,
    })
}
