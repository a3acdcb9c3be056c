// Records and display helpers shared by the store and its front ends.
pub mod models;
pub mod utils;

pub use models::{Bill, BillDraft, Category, CategoryKind, NewCategory};
