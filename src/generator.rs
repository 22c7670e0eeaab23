//! The document generator: one record in, one new PDF file out.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use uuid::Uuid;

use crate::builder::CardBuilder;
use crate::elements::load_logo;
use crate::error::Result;
use crate::record::WarrantyRecord;

/// Directory generated cards are written to unless configured otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_pdfs";
/// Logo picked up from the working directory unless configured otherwise.
pub const DEFAULT_LOGO_PATH: &str = "download.jpg";
/// Contact line printed at the bottom of every card.
pub const DEFAULT_CONTACT_INFO: &str = "Company Contact Information: 123-456-7890";

const PDF_EXTENSION: &str = "pdf";

/// Bytes escaped when a file name becomes a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where cards go and which fixed assets they embed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub logo_path: PathBuf,
    pub contact_info: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            contact_info: DEFAULT_CONTACT_INFO.to_owned(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the output directory and returns the updated config.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets the logo path and returns the updated config.
    pub fn with_logo_path(mut self, logo_path: impl Into<PathBuf>) -> Self {
        self.logo_path = logo_path.into();
        self
    }

    /// Sets the contact line and returns the updated config.
    pub fn with_contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = contact_info.into();
        self
    }
}

/// Outcome signal attached to every successful generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// A new artifact was written.
    Created,
}

/// A freshly written card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDocument {
    file_name: String,
    path: PathBuf,
}

impl GeneratedDocument {
    /// Name of the artifact inside the output directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the artifact on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Locator a static file server resolves to this artifact; the file name
    /// is percent-encoded as a single path segment.
    pub fn download_url(&self) -> String {
        format!("/{}", utf8_percent_encode(&self.file_name, PATH_SEGMENT))
    }

    pub fn status(&self) -> GenerationStatus {
        GenerationStatus::Created
    }
}

/// Renders warranty records into uniquely named PDF files.
#[derive(Clone, Debug)]
pub struct DocumentGenerator {
    config: GeneratorConfig,
}

impl DocumentGenerator {
    /// Creates a generator, creating the output directory if it is missing.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_dir)?;
        debug!("Writing cards to {}", config.output_dir.display());
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Renders `record` and writes it to a new file in the output directory.
    pub fn generate(&self, record: &WarrantyRecord) -> Result<GeneratedDocument> {
        let file_name = unique_file_name(record.sender());
        let path = self.config.output_dir.join(&file_name);

        let card = CardBuilder::new()
            .with_title(file_name.as_str())
            .with_logo(load_logo(&self.config.logo_path)?)
            .with_lines(record.detail_lines())
            .with_line(self.config.contact_info.as_str())
            .render()?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        file.write_all(&card.bytes)?;
        file.sync_all()?;

        info!(
            "Generated {} ({} bytes)",
            path.display(),
            card.bytes.len()
        );
        Ok(GeneratedDocument { file_name, path })
    }
}

/// Builds `<sender>_<uuid>.pdf`; path separators in the sender become `_`.
fn unique_file_name(sender: &str) -> String {
    let prefix: String = sender
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_{}.{}", prefix, Uuid::new_v4(), PDF_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_prefixed_by_sender() {
        let name = unique_file_name("alice");
        let id = name
            .strip_prefix("alice_")
            .and_then(|rest| rest.strip_suffix(".pdf"))
            .expect("name shape");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn file_name_never_contains_separators() {
        let name = unique_file_name("../etc/passwd");
        assert!(!name.contains('/'));
        assert!(name.starts_with(".._etc_passwd_"));
    }

    #[test]
    fn download_url_escapes_reserved_characters() {
        let document = GeneratedDocument {
            file_name: "a b?c#d%é_1.pdf".to_owned(),
            path: PathBuf::from("a b?c#d%é_1.pdf"),
        };
        assert_eq!(document.download_url(), "/a%20b%3Fc%23d%25%C3%A9_1.pdf");

        let plain = GeneratedDocument {
            file_name: "alice_1.pdf".to_owned(),
            path: PathBuf::from("alice_1.pdf"),
        };
        assert_eq!(plain.download_url(), "/alice_1.pdf");
    }

    #[test]
    fn new_creates_missing_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("nested").join("cards");
        let generator =
            DocumentGenerator::new(GeneratorConfig::default().with_output_dir(&output))
                .expect("generator");

        assert!(output.is_dir());
        assert_eq!(generator.config().output_dir, output);
    }
}
