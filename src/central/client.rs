// ZeroTier Central API client.
//
// Reads and updates the member record of the local node on a network:
//
//   GET  /api/network/{networkId}/member/{nodeId}
//     Auth: Bearer <api_key>
//     Response: member record (the body may be empty)
//
//   POST /api/network/{networkId}/member/{nodeId}
//     Auth: Bearer <api_key>
//     Body: full member record
//     Response: member record as stored
//
// The node id comes from the local daemon.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::types::{DesiredConfig, MemberRecord};
use crate::config::constants::{DEFAULT_CENTRAL_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::device::DeviceClient;
use crate::errors::{decode_json, Result, ZeroTierError};
use crate::reconcile;

/// Client for the Central member API.
#[derive(Debug, Clone)]
pub struct CentralClient {
    base_url: String,
    http: Client,
    device: DeviceClient,
}

impl CentralClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, device: DeviceClient) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            device,
        })
    }

    /// Client for the hosted Central service.
    pub fn hosted(device: DeviceClient) -> Result<Self> {
        Self::new(
            DEFAULT_CENTRAL_URL,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            device,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn device(&self) -> &DeviceClient {
        &self.device
    }

    fn member_url(&self, network_id: &str, node_id: &str) -> String {
        format!(
            "{}/api/network/{}/member/{}",
            self.base_url, network_id, node_id
        )
    }

    /// Fetch this node's member record on `network_id`.
    pub async fn get_member(&self, network_id: &str, api_key: &str) -> Result<MemberRecord> {
        let node_id = self.device.node_id().await?;
        let url = self.member_url(network_id, &node_id);
        debug!(%url, "Fetching Central member");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        read_member(resp).await
    }

    /// Submit `record` as this node's member record on `network_id`.
    pub async fn update_member(
        &self,
        network_id: &str,
        api_key: &str,
        record: &MemberRecord,
    ) -> Result<MemberRecord> {
        let node_id = self.device.node_id().await?;
        let url = self.member_url(network_id, &node_id);
        debug!(%url, "Updating Central member");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(record)
            .send()
            .await?;

        read_member(resp).await
    }

    /// Fetch the member, apply the recognized fields of `desired` and submit it.
    pub async fn update_member_config(
        &self,
        network_id: &str,
        api_key: &str,
        desired: &DesiredConfig,
    ) -> Result<MemberRecord> {
        let current = self.get_member(network_id, api_key).await?;
        let merged = reconcile::apply_desired_fields(&current, desired);
        self.update_member(network_id, api_key, &merged).await
    }
}

async fn read_member(resp: Response) -> Result<MemberRecord> {
    let status = resp.status();
    let body = resp.text().await?;

    if status != StatusCode::OK {
        return Err(ZeroTierError::remote(
            Some(status.as_u16()),
            error_text(status, &body),
        ));
    }

    // Central may answer 200 with no body at all.
    if body.trim().is_empty() {
        return Ok(MemberRecord::new());
    }

    decode_json("Central member record", &body)
}

/// Error detail for a failed response: the `error` field of a JSON body,
/// otherwise the body itself, otherwise the status line.
fn error_text(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        match map.get("error") {
            Some(Value::String(msg)) => return msg.clone(),
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> DeviceClient {
        DeviceClient::system("zerotier-cli")
    }

    #[test]
    fn test_client_builds() {
        let c = CentralClient::hosted(device());
        assert!(c.is_ok());
    }

    #[test]
    fn test_member_url_strips_trailing_slash() {
        let c = CentralClient::new("http://localhost:9000/", Duration::from_secs(5), device()).unwrap();
        assert_eq!(
            c.member_url("8056c2e21c000001", "deadbeef01"),
            "http://localhost:9000/api/network/8056c2e21c000001/member/deadbeef01"
        );
    }

    #[test]
    fn test_error_text_prefers_json_error_field() {
        assert_eq!(
            error_text(StatusCode::FORBIDDEN, r#"{"error":"forbidden"}"#),
            "forbidden"
        );
    }

    #[test]
    fn test_error_text_falls_back_to_body_then_status() {
        assert_eq!(
            error_text(StatusCode::NOT_FOUND, "no such member\n"),
            "no such member"
        );
        assert_eq!(error_text(StatusCode::BAD_GATEWAY, ""), "502 Bad Gateway");
        assert_eq!(
            error_text(StatusCode::BAD_REQUEST, r#"{"message":"bad"}"#),
            r#"{"message":"bad"}"#
        );
    }
}
