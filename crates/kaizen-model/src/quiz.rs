pub mod question;
pub mod result;
pub mod submission;
