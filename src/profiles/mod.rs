//! Configuration-profile upload support.
//!
//! Two pure helpers back the upload flow: file-name parsing, which derives
//! the profile's display name and target platform from the extension, and
//! the error-message mapping, which turns raw API failure reasons into the
//! curated messages the console shows.

mod errors;
mod upload;

pub use errors::{upload_error_message, UploadErrorKind, UploadErrorMessage, DEFAULT_ERROR_MESSAGE};
pub use upload::{parse_file_name, ParsedProfile, ProfilePlatform};
