pub use anyhow::{Context, Result};
pub use log::{debug, error, trace};
pub use std::io::Result as IoResult;

/// Formats error with all its causes on separate lines
pub fn format_error_chain(e: &anyhow::Error) -> String {
    let mut message = e.to_string();
    for cause in e.chain().skip(1) {
        message.push_str("\n  caused by: ");
        message.push_str(&cause.to_string());
    }
    message
}

pub fn log_errors(e: &anyhow::Error) {
    error!("{}", format_error_chain(e));
}
