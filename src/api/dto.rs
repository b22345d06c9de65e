//! Wire-format request/response shapes.

use serde::{Deserialize, Serialize};

use crate::admission::IpInfo;
use crate::index::Stats;

/// `POST /api/claim/{address}` request body.
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub nonce: u64,
    pub name: String,
}

/// `GET /api/ip/{address}` success response.
#[derive(Debug, Serialize)]
pub struct IpResponse {
    pub claimant: String,
    pub difficulty: u8,
}

impl From<IpInfo> for IpResponse {
    fn from(info: IpInfo) -> Self {
        IpResponse {
            claimant: info.claimant.to_string(),
            difficulty: info.difficulty,
        }
    }
}

/// `GET /api/subnet/{address}/{prefix}` response, and the per-element
/// shape of the optional all-subnets read.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub subnet: String,
    pub owner: String,
    pub percentage: f64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        StatsResponse {
            subnet: stats.subnet,
            owner: stats.owner,
            percentage: stats.percentage,
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Uniform error body for non-2xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
