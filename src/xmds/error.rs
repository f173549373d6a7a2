use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the CMS web service
#[derive(Debug, Error)]
pub enum XmdsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML serialization failed: {0}")]
    Serialization(#[from] quick_xml::SeError),

    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    #[error("SOAP fault: {0}")]
    Fault(String),

    #[error("Blacklist request was rejected by the CMS")]
    Rejected,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
