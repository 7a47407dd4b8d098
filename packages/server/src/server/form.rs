//! Form submission extractor.
//!
//! Accepts `multipart/form-data` and `application/x-www-form-urlencoded`
//! bodies and flattens them into `FormFields`. A multipart file part is
//! inlined as a `data:` URI into `image_url`.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::domains::posts::data::{keys, ActionOutcome, ActionResult, FormFields};

/// Submitted form fields, whatever the encoding.
#[derive(Debug, Clone)]
pub struct SubmittedForm(pub FormFields);

type FormRejection = (StatusCode, Json<ActionResult>);

fn reject(status: StatusCode, message: impl Into<String>) -> FormRejection {
    (
        status,
        Json(ActionResult::failure(ActionOutcome::Validation, message)),
    )
}

#[async_trait]
impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| reject(e.status(), e.body_text()))?;
            return read_multipart(multipart).await.map(SubmittedForm);
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| reject(e.status(), e.body_text()))?;

        Ok(SubmittedForm(pairs.into_iter().collect()))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormFields, FormRejection> {
    let mut fields = FormFields::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(e.status(), e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let is_file = field.file_name().is_some_and(|f| !f.is_empty());
        if is_file {
            let mime = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| reject(e.status(), e.body_text()))?;

            // Browsers send an empty part when no file was picked
            if !bytes.is_empty() {
                debug!(field = %name, mime = %mime, size = bytes.len(), "Inlining uploaded file");
                image = Some(data_uri(&mime, &bytes));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| reject(e.status(), e.body_text()))?;
        fields.insert(&name, value);
    }

    if let Some(image) = image {
        fields.insert(keys::IMAGE_URL, image);
    }

    Ok(fields)
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
