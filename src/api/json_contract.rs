use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ViewportConfig;

pub const VIEWPORT_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ViewportConfig,
}

impl ViewportConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize viewport config json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ViewportConfigJsonContractV1 {
            schema_version: VIEWPORT_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!(
                "failed to serialize viewport config contract v1: {e}"
            ))
        })
    }

    /// Parses and validates a config from either a bare object or a
    /// versioned contract payload.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config = match serde_json::from_str::<ViewportConfigJsonContractV1>(input) {
            Ok(payload) => {
                if payload.schema_version != VIEWPORT_CONFIG_JSON_SCHEMA_V1 {
                    return Err(ChartError::InvalidData(format!(
                        "unsupported viewport config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
            Err(_) => serde_json::from_str::<ViewportConfig>(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse viewport config json: {e}"))
            })?,
        };
        config.validate()?;
        Ok(config)
    }
}
