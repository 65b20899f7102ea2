//! Text Extractor — pulls raw text out of uploaded resume PDFs and
//! job-posting web pages. Leaf dependency: no design complexity, and the
//! quality of extraction is explicitly best-effort.

use tracing::debug;

use crate::errors::AppError;

/// Extracts text from PDF bytes (uploaded resume).
pub fn extract_pdf_text(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Extract(format!("Failed to extract PDF text: {e}")))?;
    if text.trim().is_empty() {
        return Err(AppError::Extract(
            "PDF contained no extractable text".to_string(),
        ));
    }
    debug!("Extracted {} chars from PDF", text.len());
    Ok(text)
}

/// Fetches a job-posting page and reduces it to visible text.
pub async fn fetch_page_text(url: &str) -> Result<String, AppError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| AppError::Extract(format!("Failed to fetch {url}: {e}")))?;
    if !response.status().is_success() {
        return Err(AppError::Extract(format!(
            "Fetching {url} returned status {}",
            response.status()
        )));
    }
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Extract(format!("Failed to read body of {url}: {e}")))?;

    let text = visible_text(&body);
    if text.trim().is_empty() {
        return Err(AppError::Extract(format!("No visible text at {url}")));
    }
    Ok(text)
}

/// Strips an HTML document down to its visible body text.
fn visible_text(html: &str) -> String {
    let document = scraper::Html::parse_document(html);
    let body = scraper::Selector::parse("body").expect("static selector");
    let text: Vec<&str> = document
        .select(&body)
        .flat_map(|el| el.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    text.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_strips_markup() {
        let html = r#"<html><head><title>x</title></head>
            <body><h1>Data Scientist</h1><p>Build <b>models</b>.</p></body></html>"#;
        let text = visible_text(html);
        assert!(text.contains("Data Scientist"));
        assert!(text.contains("models"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_visible_text_empty_document() {
        assert!(visible_text("<html><body></body></html>").trim().is_empty());
    }

    #[test]
    fn test_extract_pdf_text_rejects_garbage() {
        assert!(extract_pdf_text(b"not a pdf at all").is_err());
    }
}
