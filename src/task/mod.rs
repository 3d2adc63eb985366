//! Task rows projected out of workbook sheets

mod columns;
mod model;

pub use columns::TaskColumns;
pub use model::{TaskRecord, TaskStatus};
