pub mod assignment;
pub mod employee;
pub mod matching;
pub mod project;
pub mod skill;
