//! Common infrastructure shared by the token model and the scanner

mod error;

pub use error::{DiagnosticReporter, ScanError, ScanResult};
