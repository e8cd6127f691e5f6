use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotKind {
    Before,
    After,
}

impl ScreenshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenshotKind::Before => "before",
            ScreenshotKind::After => "after",
        }
    }
}

impl fmt::Display for ScreenshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenshotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(ScreenshotKind::Before),
            "after" => Ok(ScreenshotKind::After),
            other => Err(format!("Unknown screenshot type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureUrlRequest {
    pub trade_id: i64,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ScreenshotKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotResponse {
    #[serde(default)]
    pub success: bool,
    pub filename: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
}
