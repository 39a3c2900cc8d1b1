pub mod catalog;
pub mod recommendations;
pub mod retry;

pub use catalog::{Listing, MovieCatalog, TmdbCatalog};
