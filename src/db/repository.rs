use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::Course;

/// Course storage, addressed by title rather than by id.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Absence is `Ok(None)`, never an error.
    async fn get_by_title(&self, title: &str) -> Result<Option<Course>, AppError>;

    async fn get_all(&self) -> Result<Vec<Course>, AppError>;

    /// Fails with `AlreadyExists` when a course with `title` is present.
    async fn add(&self, title: &str, duration: i64, description: &str) -> Result<(), AppError>;

    /// Rewrites the course with `title`, keeping its id.
    ///
    /// When no such course exists this inserts it instead, exactly as `add`
    /// would. Callers get upsert semantics from `PUT /api/v1/course`.
    async fn update(&self, title: &str, duration: i64, description: &str) -> Result<(), AppError>;

    /// Fails with `NotFound` when no course with `title` is present.
    async fn delete_by_title(&self, title: &str) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct SqliteCourseRepository {
    db: SqlitePool,
}

impl SqliteCourseRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn get_by_title(&self, title: &str) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, title, duration, description FROM courses WHERE title = ? LIMIT 1"
        )
        .bind(title)
        .fetch_optional(&self.db)
        .await?;

        Ok(course)
    }

    async fn get_all(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, title, duration, description FROM courses ORDER BY id"
        )
        .fetch_all(&self.db)
        .await?;

        Ok(courses)
    }

    async fn add(&self, title: &str, duration: i64, description: &str) -> Result<(), AppError> {
        if self.get_by_title(title).await?.is_some() {
            return Err(AppError::course_exists(title));
        }

        // The UNIQUE constraint catches an insert that raced past the check above.
        let result = sqlx::query(
            "INSERT INTO courses (title, duration, description) VALUES (?, ?, ?)"
        )
        .bind(title)
        .bind(duration)
        .bind(description)
        .execute(&self.db)
        .await;

        match result {
            Ok(done) => {
                let course = Course {
                    id: done.last_insert_rowid(),
                    title: title.to_string(),
                    duration,
                    description: description.to_string(),
                };
                info!("inserted {}", course);
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::course_exists(title))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, title: &str, duration: i64, description: &str) -> Result<(), AppError> {
        let mut course = match self.get_by_title(title).await? {
            Some(c) => c,
            None => {
                debug!("course '{}' does not exist, inserting", title);
                return self.add(title, duration, description).await;
            }
        };

        sqlx::query(
            "UPDATE courses SET duration = ?, description = ?, title = ? WHERE id = ?"
        )
        .bind(duration)
        .bind(description)
        .bind(title)
        .bind(course.id)
        .execute(&self.db)
        .await?;

        course.duration = duration;
        course.description = description.to_string();
        info!("updated {}", course);
        Ok(())
    }

    async fn delete_by_title(&self, title: &str) -> Result<(), AppError> {
        let current = self
            .get_by_title(title)
            .await?
            .ok_or_else(|| AppError::course_missing(title))?;

        let deleted = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(current.id)
            .execute(&self.db)
            .await?
            .rows_affected();

        // Another request removed it between the lookup and the delete.
        if deleted == 0 {
            return Err(AppError::course_missing(title));
        }

        info!("deleted course '{}' (id {})", title, current.id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}
