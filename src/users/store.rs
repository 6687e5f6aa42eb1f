//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use crate::users::models::{NewUser, User};
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row, ToSql};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Hash a plaintext password with bcrypt.
pub fn hash_password(plaintext: &str) -> Result<String> {
    hash(plaintext, DEFAULT_COST).context("Failed to hash password")
}

/// Compare a plaintext candidate against a stored bcrypt digest.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool> {
    verify(plaintext, digest).context("Failed to verify password")
}

/// Failure modes of user creation. The username conflict is its own variant
/// so the API layer can surface it as a validation-shaped error.
#[derive(Debug)]
pub enum CreateUserError {
    UsernameTaken,
    Db(anyhow::Error),
}

impl fmt::Display for CreateUserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateUserError::UsernameTaken => write!(f, "Username already taken"),
            CreateUserError::Db(e) => write!(f, "Database error: {e}"),
        }
    }
}

impl std::error::Error for CreateUserError {}

/// Partial update of a stored user. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_arm: Option<f64>,
    pub armhole: Option<f64>,
    pub length: Option<f64>,
    pub wrist: Option<f64>,
}

/// User storage with SQLite backend.
///
/// Username uniqueness lives in the schema: the `UNIQUE` constraint on
/// `username` is the sole source of conflict errors, so two concurrent
/// registrations for the same name cannot both succeed.
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open user database")
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                email TEXT NOT NULL,
                chest REAL,
                waist REAL,
                hips REAL,
                upper_arm REAL,
                armhole REAL,
                length REAL,
                wrist REAL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create a new user, hashing the password before persisting.
    pub fn create_user(&self, new_user: NewUser) -> Result<User, CreateUserError> {
        let password_hash = hash_password(&new_user.password).map_err(CreateUserError::Db)?;

        let user = User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            username: new_user.username,
            password_hash,
            email: new_user.email,
            chest: None,
            waist: None,
            hips: None,
            upper_arm: None,
            armhole: None,
            length: None,
            wrist: None,
        };

        let conn = self.open().map_err(CreateUserError::Db)?;
        let insert = conn.execute(
            "INSERT INTO users (id, first_name, last_name, username, password_hash, email)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id.to_string(),
                user.first_name,
                user.last_name,
                user.username,
                user.password_hash,
                user.email,
            ],
        );

        match insert {
            Ok(_) => {
                info!("✅ Created user: {}", user.username);
                Ok(user)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(CreateUserError::UsernameTaken)
            }
            Err(e) => Err(CreateUserError::Db(
                anyhow::Error::new(e).context("Failed to insert user"),
            )),
        }
    }

    /// Get a user by username.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))?;
        let result = stmt.query_row(params![username], row_to_user);

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by id.
    pub fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let conn = self.open()?;

        let mut stmt =
            conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
        let result = stmt.query_row(params![id.to_string()], row_to_user);

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all users.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users"))?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Apply a partial update, returning the stored record afterwards.
    /// Returns `None` when no user with the given id exists.
    pub fn update_fields(&self, id: &Uuid, update: UserUpdate) -> Result<Option<User>> {
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

        push_set!(update.first_name, "first_name");
        push_set!(update.last_name, "last_name");
        push_set!(update.email, "email");
        push_set!(update.password_hash, "password_hash");
        push_set!(update.chest, "chest");
        push_set!(update.waist, "waist");
        push_set!(update.hips, "hips");
        push_set!(update.upper_arm, "upper_arm");
        push_set!(update.armhole, "armhole");
        push_set!(update.length, "length");
        push_set!(update.wrist, "wrist");

        if !sets.is_empty() {
            values.push(Box::new(id.to_string()));
            let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));

            let conn = self.open()?;
            conn.execute(&sql, params_from_iter(values.iter().map(|v| v.as_ref())))
                .context("Failed to update user")?;
        }

        self.get_user_by_id(id)
    }

    /// Delete a user by id. Returns false when no row matched.
    pub fn delete_user(&self, id: &Uuid) -> Result<bool> {
        let conn = self.open()?;

        let rows_affected =
            conn.execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;

        if rows_affected > 0 {
            info!("🗑️  Deleted user: {}", id);
        }
        Ok(rows_affected > 0)
    }
}

const USER_COLUMNS: &str = "id, first_name, last_name, username, password_hash, email, \
                            chest, waist, hips, upper_arm, armhole, length, wrist";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(User {
        id,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        username: row.get(3)?,
        password_hash: row.get(4)?,
        email: row.get(5)?,
        chest: row.get(6)?,
        waist: row.get(7)?,
        hips: row.get(8)?,
        upper_arm: row.get(9)?,
        armhole: row.get(10)?,
        length: row.get(11)?,
        wrist: row.get(12)?,
    })
}
