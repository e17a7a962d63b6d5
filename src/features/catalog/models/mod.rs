mod category;

pub use category::{Category, Subcategory};
