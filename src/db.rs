use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::auth::password;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Timestamp format used for created_at / updated_at columns, matching the
/// SQLite datetime('now') defaults in the schema.
pub fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_path: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_path).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Create the admin member if no members exist yet. The admin gets the
/// full set of tree-management permissions.
pub fn seed_admin(pool: &DbPool, admin_password: &str) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))
        .unwrap_or(0);
    if count > 0 {
        log::info!("Members already seeded ({count} present), skipping");
        return;
    }

    let hash = password::hash_password(admin_password)
        .expect("Failed to hash admin password");
    conn.execute(
        "INSERT INTO members (username, password_hash, permission_codes) \
         VALUES ('admin', ?1, 'trees.manage,trees.delete')",
        params![hash],
    )
    .expect("Failed to seed admin member");

    log::info!("Seeded admin member");
}
