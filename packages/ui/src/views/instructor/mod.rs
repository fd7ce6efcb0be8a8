mod course_detail;
pub use course_detail::{validate_pdf_upload, InstructorCourseDetail};

mod courses;
pub use courses::InstructorCourses;
