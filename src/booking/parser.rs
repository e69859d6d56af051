use std::collections::HashMap;

use axum::http::HeaderMap;
use bytes::Bytes;

use super::form::IMAGE;

/// A file picked in the form's file input, not yet uploaded anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct ParsedForm {
    pub fields: HashMap<String, String>,
    pub attachment: Option<Attachment>,
}

/// Parse a form post based on its Content-Type header.
pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<ParsedForm, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("multipart/form-data") {
        parse_multipart(content_type, body).await
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Ok(ParsedForm {
            fields: parse_form_urlencoded(&body)?,
            attachment: None,
        })
    } else {
        Err(format!("Unsupported content type: {content_type}"))
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<HashMap<String, String>, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;
    Ok(form_urlencoded::parse(body_str.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<ParsedForm, String> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parsed = ParsedForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let name = field.name().unwrap_or("unknown").to_string();

        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            let value = field
                .text()
                .await
                .map_err(|e| format!("Field read error: {e}"))?;
            parsed.fields.insert(name, value);
            continue;
        };

        let content_type = field.content_type().map(|m| m.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("File read error: {e}"))?;

        // An untouched file input still sends a part, just with no name and no body.
        if name != IMAGE || parsed.attachment.is_some() || (filename.is_empty() && bytes.is_empty()) {
            continue;
        }

        parsed.attachment = Some(Attachment {
            filename,
            content_type,
            bytes,
        });
    }

    Ok(parsed)
}
