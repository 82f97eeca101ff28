pub mod course;
pub mod message;

pub use course::{Course, CourseRequest};
pub use message::Message;
