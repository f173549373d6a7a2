use serde::Serialize;

use crate::blacklist::BlacklistScope;
use crate::soap::Operation;

/// A blacklist addition to report to the CMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistReport {
    pub media_id: i32,
    pub scope: BlacklistScope,
    pub reason: String,
}

/// Body of the XMDS `BlackList` call
#[derive(Clone, Serialize)]
pub struct BlackListRequest {
    #[serde(rename = "serverKey")]
    pub server_key: String,
    #[serde(rename = "hardwareKey")]
    pub hardware_key: String,
    #[serde(rename = "mediaId")]
    pub media_id: i32,
    #[serde(rename = "type")]
    pub scope: String,
    pub reason: String,
    pub version: String,
}

impl Operation for BlackListRequest {
    const ELEMENT: &'static str = "xmds:BlackList";
}
