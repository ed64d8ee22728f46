pub mod colleges;
pub mod core;
pub mod dashboard;
pub mod exams;
pub mod members;
pub mod results;
pub mod students;
