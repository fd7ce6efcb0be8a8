mod categories;
pub use categories::CategoriesView;

mod courses;
pub use courses::CoursesView;

mod overview;
pub use overview::AdminOverview;

mod users;
pub use users::{validate_user_form, UsersView};
