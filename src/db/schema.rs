use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::CourseRepository;

const CREATE_COURSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    duration INTEGER NOT NULL,
    description TEXT NOT NULL
)
"#;

pub const SAMPLE_COURSES: [(&str, i64, &str); 3] = [
    ("Go", 1000, "Go is awesome"),
    ("python", 2000, "python is awesome"),
    ("java", 3000, "java is awesome"),
];

/// Creates the `courses` table, dropping it first when `reset` is set.
pub async fn bootstrap(db: &SqlitePool, reset: bool) -> Result<(), sqlx::Error> {
    if reset {
        warn!("resetting courses table");
        sqlx::query("DROP TABLE IF EXISTS courses").execute(db).await?;
    }

    sqlx::query(CREATE_COURSES_TABLE).execute(db).await?;
    Ok(())
}

/// Inserts `SAMPLE_COURSES`, skipping any that fail. Returns how many were added.
pub async fn seed(repo: &dyn CourseRepository) -> usize {
    let mut added = 0;

    for (title, duration, description) in SAMPLE_COURSES {
        match repo.add(title, duration, description).await {
            Ok(()) => added += 1,
            Err(e) => warn!("insert error: {}", e),
        }
    }

    info!("seeded {} of {} sample courses", added, SAMPLE_COURSES.len());
    added
}
