pub mod scan;
pub mod walker;

pub use scan::{scan, scan_files, ScanRecord};
pub use walker::FileWalker;
