//! Named CSV payloads handed back to the caller

use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::info;

use crate::Result;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

impl OutputFile {
    pub const MIME_TYPE: &'static str = "text/csv";

    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Number of data records, header excluded
    ///
    /// Counted as CSV records, so a quoted cell holding a line break does not
    /// add a row.
    #[must_use]
    pub fn row_count(&self) -> usize {
        ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(self.content.as_bytes())
            .records()
            .count()
    }
}

/// Every file produced from one input, in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFileSet {
    files: Vec<OutputFile>,
}

impl OutputFileSet {
    pub(crate) fn push(&mut self, file: OutputFile) {
        self.files.push(file);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file into `directory`, creating it if needed
    pub fn write_all(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(directory)?;

        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = directory.join(&file.name);
            fs::write(&path, &file.content)?;
            info!("Wrote {} ({} rows)", path.display(), file.row_count());
            written.push(path);
        }
        Ok(written)
    }
}

impl FromIterator<OutputFile> for OutputFileSet {
    fn from_iter<I: IntoIterator<Item = OutputFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OutputFileSet {
    type Item = &'a OutputFile;
    type IntoIter = std::slice::Iter<'a, OutputFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
