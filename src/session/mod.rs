pub mod grader;
pub mod quiz;
pub mod result;
