pub mod file_magic;
pub mod jwt;
pub mod multipart;
pub mod parameter_error_handler;
pub mod password;
pub mod pdf_text;
pub mod validate;

pub use file_magic::is_pdf;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::path_error_handler;
