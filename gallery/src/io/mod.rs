pub mod catalog_loader;


pub use catalog_loader::{load_catalog, load_comparison, parse_catalog_str, LoadedCatalog};
