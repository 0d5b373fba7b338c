pub mod url_validator;

pub use url_validator::{UrlValidationError, validate_url, validation_error_message};
