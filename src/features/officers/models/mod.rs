mod officer;

pub use officer::Officer;
