use crate::error::ExportError;

const PATH_MARKER: &str = "/spreadsheets/d/";

/// Spreadsheet document id taken from a sharing/edit URL such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    /// Extract the first run of `[A-Za-z0-9_-]` following `/spreadsheets/d/`.
    pub fn from_url(url: &str) -> Result<Self, ExportError> {
        let malformed = || ExportError::MalformedUrl(url.to_string());

        let start = url.find(PATH_MARKER).ok_or_else(malformed)? + PATH_MARKER.len();
        let id: String = url[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();

        if id.is_empty() {
            return Err(malformed());
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
