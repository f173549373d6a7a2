use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};

use super::{BlackListRequest, BlacklistNotifier, BlacklistReport, XmdsError};
use crate::config::XmdsConfig;
use crate::soap::{Envelope, fault_string, find_text};

const SOAP_ACTION_BLACKLIST: &str = "\"urn:xmds#BlackList\"";
const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// SOAP client for the CMS `BlackList` call
#[derive(Debug, Clone)]
pub struct XmdsClient {
    http: Client,
    url: String,
    server_key: SecretString,
    hardware_key: String,
    version: String,
}

impl XmdsClient {
    pub fn new(config: &XmdsConfig) -> Result<Self, XmdsError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            server_key: config.server_key.clone(),
            hardware_key: config.hardware_key.clone(),
            version: config.version.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Builds the request body for a report, filling in the display identity.
    pub fn request(&self, report: &BlacklistReport) -> BlackListRequest {
        BlackListRequest {
            server_key: self.server_key.expose_secret().to_string(),
            hardware_key: self.hardware_key.clone(),
            media_id: report.media_id,
            scope: report.scope.to_string(),
            reason: report.reason.clone(),
            version: self.version.clone(),
        }
    }

    /// Sends a `BlackList` call and checks the CMS acknowledged it.
    pub async fn black_list(&self, report: &BlacklistReport) -> Result<(), XmdsError> {
        let body = Envelope::new(self.request(report)).serialize_soap(false)?;

        tracing::debug!(
            media_id = report.media_id,
            scope = %report.scope,
            "Sending BlackList request to {}",
            self.url
        );

        let resp = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_XML)
            .header("SOAPAction", SOAP_ACTION_BLACKLIST)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        parse_response(status, &text)
    }
}

#[async_trait]
impl BlacklistNotifier for XmdsClient {
    async fn notify(&self, report: &BlacklistReport) -> Result<(), XmdsError> {
        self.black_list(report).await
    }
}

fn parse_response(status: StatusCode, body: &str) -> Result<(), XmdsError> {
    if !status.is_success() {
        // Faults come back as 500 with a SOAP body; anything else is a transport problem
        return match fault_string(body) {
            Ok(Some(fault)) => Err(XmdsError::Fault(fault)),
            _ => Err(XmdsError::Status(status)),
        };
    }

    if let Some(fault) = fault_string(body)? {
        return Err(XmdsError::Fault(fault));
    }

    match find_text(body, "success")?.as_deref() {
        Some("true") | Some("1") => Ok(()),
        Some(_) => Err(XmdsError::Rejected),
        None => Err(XmdsError::MalformedResponse(
            "missing success element".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blacklist::BlacklistScope;

    fn response(success: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="urn:xmds">
  <SOAP-ENV:Body>
    <ns1:BlackListResponse><success>{success}</success></ns1:BlackListResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
        )
    }

    fn test_config() -> XmdsConfig {
        XmdsConfig {
            url: "http://localhost/xmds.php?v=5".to_string(),
            server_key: SecretString::from("server-key".to_string()),
            hardware_key: "hw-1".to_string(),
            version: "4".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_parse_success() {
        assert!(parse_response(StatusCode::OK, &response("true")).is_ok());
        assert!(parse_response(StatusCode::OK, &response("1")).is_ok());
    }

    #[test]
    fn test_parse_rejected() {
        assert!(matches!(
            parse_response(StatusCode::OK, &response("false")),
            Err(XmdsError::Rejected)
        ));
    }

    #[test]
    fn test_parse_missing_success() {
        assert!(matches!(
            parse_response(StatusCode::OK, "<Envelope><Body/></Envelope>"),
            Err(XmdsError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_fault() {
        let fault = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body><SOAP-ENV:Fault><faultcode>Sender</faultcode><faultstring>Server key incorrect</faultstring></SOAP-ENV:Fault></SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

        match parse_response(StatusCode::INTERNAL_SERVER_ERROR, fault) {
            Err(XmdsError::Fault(msg)) => assert_eq!(msg, "Server key incorrect"),
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_http_error_without_soap_body() {
        assert!(matches!(
            parse_response(StatusCode::BAD_GATEWAY, "<html>Bad gateway"),
            Err(XmdsError::Status(StatusCode::BAD_GATEWAY))
        ));
    }

    #[test]
    fn test_request_carries_display_identity() {
        let client = XmdsClient::new(&test_config()).unwrap();
        let report = BlacklistReport {
            media_id: 42,
            scope: BlacklistScope::All,
            reason: "Broken video".to_string(),
        };

        let request = client.request(&report);

        assert_eq!(request.server_key, "server-key");
        assert_eq!(request.hardware_key, "hw-1");
        assert_eq!(request.media_id, 42);
        assert_eq!(request.scope, "All");
        assert_eq!(request.reason, "Broken video");
        assert_eq!(request.version, "4");
        assert_eq!(client.url(), "http://localhost/xmds.php?v=5");
    }
}
