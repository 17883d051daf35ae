// Adapters layer: concrete implementations of the domain ports.

pub mod zip_archive;

pub use zip_archive::ZipArchiveBuilder;
