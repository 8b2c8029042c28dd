//! The small REST surface the engine consumes. Credentials are ambient
//! (cookie-based session); a failure rejects the future and is logged by the
//! caller, never written into the store.

use common::types::{AttachmentInfo, CustomEmoji, UserProfile};
use reqwest::multipart;
use url::Url;

use crate::error::Result;

pub struct Rest {
    http: reqwest::Client,
    base_url: Url,
}

impl Rest {
    pub(crate) fn new(base_url: Url) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    /// `POST /api/uploads`, multipart. the returned attachment id goes into
    /// the next `send_message`.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachmentInfo> {
        let url = self.base_url.join("/api/uploads")?;
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);
        Ok(self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// `GET /api/users/{nickname}`
    pub async fn user_profile(&self, nickname: &str) -> Result<UserProfile> {
        let url = self.base_url.join(&format!("/api/users/{nickname}"))?;
        Ok(self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// `GET /api/servers/{id}/emoji`
    pub async fn server_emoji(&self, server_id: &str) -> Result<Vec<CustomEmoji>> {
        let url = self
            .base_url
            .join(&format!("/api/servers/{server_id}/emoji"))?;
        Ok(self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}
