use thiserror::Error;

use gstforge_core::DomainError;
use gstforge_render::RenderError;
use gstforge_sheets::ExportError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("spreadsheet export is not configured")]
    NotConfigured,
}

impl SessionError {
    /// Errors caused by user input (as opposed to rendering or the network).
    pub fn is_input_error(&self) -> bool {
        match self {
            SessionError::Domain(e) => e.is_user_facing(),
            SessionError::Export(ExportError::MalformedUrl(_)) => true,
            _ => false,
        }
    }

    /// Text for a user-facing notice. Validation messages are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Domain(DomainError::Validation(msg) | DomainError::InvalidId(msg)) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }
}
