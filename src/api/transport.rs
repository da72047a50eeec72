//! reqwest-backed transport (fetch in the browser).

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{ApiResult, FormField, HttpRequest, HttpResponse, RequestBody, Transport};
use crate::config::AppConfig;

pub struct ReqwestTransport {
    client: reqwest::Client,
    config: AppConfig,
}

impl ReqwestTransport {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn build_form(fields: Vec<FormField>) -> ApiResult<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, file_name, mime, bytes } => {
                let mut part = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime {
                    part = part.mime_str(&mime)?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let url = self.config.url(&request.path);
        let mut builder = self.client.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        log::debug!("[API] {} -> {}", request.path, status);
        Ok(HttpResponse { status, body })
    }
}
