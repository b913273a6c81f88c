// HTTP-facing errors
pub mod page;

pub use page::PageError;
