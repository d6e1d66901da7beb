//! Writes exported quotes to the user's downloads folder.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::QuoteSummary;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no downloads or home directory available")]
    DirectoryUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn export_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}

pub fn save_quote(summary: &QuoteSummary) -> Result<PathBuf, ExportError> {
    let dir = export_dir().ok_or(ExportError::DirectoryUnavailable)?;
    save_quote_in(&dir, summary)
}

fn save_quote_in(dir: &Path, summary: &QuoteSummary) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(&summary.reference));
    fs::write(&path, &summary.text)?;
    tracing::info!(path = %path.display(), reference = %summary.reference, "exported quote");
    Ok(path)
}

fn file_name(reference: &str) -> String {
    let safe: String = reference
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
        .collect();
    format!("quote-{safe}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_path_characters() {
        assert_eq!(file_name("Q-1A2B3C4D"), "quote-Q-1A2B3C4D.txt");
        assert_eq!(file_name("../Q 1"), "quote-Q1.txt");
    }

    #[test]
    fn writes_summary_text() {
        let dir = std::env::temp_dir().join(format!("quote-export-{}", uuid::Uuid::new_v4()));
        let summary = QuoteSummary {
            reference: "Q-TEST".to_string(),
            text: "Hola\n$350".to_string(),
        };

        let path = save_quote_in(&dir, &summary).unwrap();
        assert_eq!(path, dir.join("quote-Q-TEST.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hola\n$350");
        fs::remove_dir_all(dir).unwrap();
    }
}
