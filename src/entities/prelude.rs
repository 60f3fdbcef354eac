pub use super::courses::Entity as Courses;
pub use super::documents::Entity as Documents;
pub use super::downloads::Entity as Downloads;
pub use super::faculties::Entity as Faculties;
pub use super::majors::Entity as Majors;
pub use super::universities::Entity as Universities;
pub use super::users::Entity as Users;
