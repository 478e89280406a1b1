pub mod student;

pub use student::{StudentCreate, StudentUpdate};
