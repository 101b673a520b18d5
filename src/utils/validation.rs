// Validation utilities
use crate::error::{Error, Result};
use url::Url;

/// Parse a manual page-jump input against the current page count.
///
/// Rejects non-numeric input and numbers outside `[1, total_pages]`. This is
/// user-input validation: the caller keeps its current page on error.
pub fn parse_page_jump(raw: &str, total_pages: usize) -> Result<usize> {
    let page: usize = raw
        .trim()
        .parse()
        .map_err(|_| invalid_page(total_pages))?;

    if page < 1 || page > total_pages {
        return Err(invalid_page(total_pages));
    }

    Ok(page)
}

fn invalid_page(total_pages: usize) -> Error {
    Error::Validation(format!("Enter a page between 1 and {total_pages}"))
}

/// Validate that the configured dataset URL is well-formed http(s).
///
/// The URL is operator-supplied configuration, not user input, so no
/// private-address filtering is applied here; local mirrors are fine.
pub fn validate_dataset_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(Error::Validation(format!(
                "Dataset URL must use http or https scheme: {url_str}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Validation(
            "Dataset URL must have a valid host".to_string(),
        ));
    }

    Ok(url)
}
