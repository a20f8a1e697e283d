//! Scored address lists from the vps789 open API
//!
//! Both endpoints return JSON envelopes `{code, message, count, data}`; the
//! entries are flattened into `ip:443#label-score` lines the address parser
//! understands.

use serde::Deserialize;
use serde_json::Value;

use crate::models::DEFAULT_PORT;

pub const HOURLY_API_URL: &str = "https://vps789.com/openApi/cfIpApi";
pub const DAILY_API_URL: &str = "https://vps789.com/openApi/cfIpTop20";

/// Carrier categories of the hourly list, in output order
const CARRIERS: [&str; 3] = ["CT", "CU", "CM"];

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ScoredIp {
    pub ip: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "avgScore")]
    pub avg_score: Option<Value>,
}

impl ScoredIp {
    /// `avgScore` rendered like a JSON number, `None` unless it is numeric
    fn score(&self) -> Option<String> {
        self.avg_score
            .as_ref()
            .and_then(Value::as_f64)
            .map(|score| score.to_string())
    }

    fn ip(&self) -> Option<&str> {
        self.ip.as_deref().filter(|ip| !ip.is_empty())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct HourlyData {
    #[serde(rename = "CT")]
    pub ct: Option<Vec<ScoredIp>>,
    #[serde(rename = "CU")]
    pub cu: Option<Vec<ScoredIp>>,
    #[serde(rename = "CM")]
    pub cm: Option<Vec<ScoredIp>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DailyData {
    pub good: Option<Vec<ScoredIp>>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreResponse<T> {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Lines for the hourly per-carrier list: `ip:443#CT-97.5`
pub fn hourly_lines(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let response: ScoreResponse<HourlyData> = serde_json::from_str(body)?;
    let Some(data) = response.data else {
        return Ok(Vec::new());
    };

    let groups = [&data.ct, &data.cu, &data.cm];
    let mut lines = Vec::new();
    for (carrier, group) in CARRIERS.iter().zip(groups) {
        for item in group.iter().flatten() {
            if let (Some(ip), Some(score)) = (item.ip(), item.score()) {
                lines.push(format!("{}:{}#{}-{}", ip, DEFAULT_PORT, carrier, score));
            }
        }
    }
    Ok(lines)
}

/// Lines for the daily top list: `ip:443#label-97.5`
pub fn daily_lines(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let response: ScoreResponse<DailyData> = serde_json::from_str(body)?;
    let items = response.data.and_then(|d| d.good).unwrap_or_default();

    Ok(items
        .iter()
        .filter_map(|item| {
            let label = item.label.as_deref().filter(|l| !l.is_empty())?;
            Some(format!(
                "{}:{}#{}-{}",
                item.ip()?,
                DEFAULT_PORT,
                label,
                item.score()?
            ))
        })
        .collect())
}
