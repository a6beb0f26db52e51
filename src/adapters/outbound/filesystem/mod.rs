/// Filesystem adapters: manifest and workspace reading, source scanning, report output
mod file_reader;
mod file_writer;
mod source_scanner;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use source_scanner::{FileSystemSourceScanner, DEFAULT_IGNORED_DIRS, DEFAULT_SOURCE_EXTENSIONS};
