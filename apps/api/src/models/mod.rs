pub mod job;
pub mod skills;
pub mod student;
