pub mod comment;
pub mod sarif;
