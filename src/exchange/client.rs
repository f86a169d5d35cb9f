use crate::config::UploaderConfig;
use crate::error::ExchangeError;
use crate::intake::SelectedFile;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};

/// Raw successful response: the generated file and its naming hint.
#[derive(Debug)]
pub struct ExchangeResponse {
    pub body: Vec<u8>,
    pub content_disposition: Option<String>,
}

#[derive(Clone)]
pub struct ExchangeClient {
    http: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl ExchangeClient {
    pub fn new(config: &UploaderConfig) -> Result<Self, ExchangeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, file: &SelectedFile) -> Result<ExchangeResponse, ExchangeError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(file.mime)?;
        let form = Form::new().part(self.field_name.clone(), part);

        tracing::info!(
            file = %file.name,
            size = file.size(),
            endpoint = %self.endpoint,
            "uploading spreadsheet"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "server rejected upload");
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();

        tracing::info!(
            status = status.as_u16(),
            bytes = body.len(),
            content_disposition = content_disposition.as_deref().unwrap_or("-"),
            "received generated file"
        );

        Ok(ExchangeResponse {
            body,
            content_disposition,
        })
    }
}
