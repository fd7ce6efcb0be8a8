mod dashboard;
pub use dashboard::{AdminLayout, InstructorLayout};

mod not_found;
pub use not_found::NotFound;
