use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Measurement unit of an indicator. Only affects how values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorUnit {
    Number,
    Percent,
    Currency,
}

impl IndicatorUnit {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            IndicatorUnit::Number => "number",
            IndicatorUnit::Percent => "percent",
            IndicatorUnit::Currency => "currency",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "number" => Some(IndicatorUnit::Number),
            "percent" => Some(IndicatorUnit::Percent),
            "currency" => Some(IndicatorUnit::Currency),
            _ => None,
        }
    }
}
