mod console;
mod export;

pub use console::ConsoleReporter;
pub use export::{ExportData, HtmlExporter, JsonExporter};
