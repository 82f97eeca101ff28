use std::sync::Arc;

use crate::db::CourseRepository;

#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseRepository>,
}

impl AppState {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }
}
