use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Deserializer};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// A numeric request field as clients actually send it: a JSON number or a
/// numeric string (HTML form values arrive as strings). Anything else is a
/// validation error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn as_float(&self) -> Result<f64, String> {
        match self {
            RawNumber::Number(value) => Ok(*value),
            RawNumber::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{text}' is not a number")),
        }
    }

    /// Whole non-negative count. Fractional numbers truncate; fractional or
    /// negative strings do not parse.
    fn as_count(&self) -> Result<u64, String> {
        match self {
            RawNumber::Number(value) if *value >= 0.0 => Ok(value.trunc() as u64),
            RawNumber::Number(value) => Err(format!("{value} must not be negative")),
            RawNumber::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("'{text}' is not a whole count")),
        }
    }

    fn as_years(&self) -> Result<i32, String> {
        match self {
            RawNumber::Number(value) => Ok(value.trunc() as i32),
            RawNumber::Text(text) => text
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("'{text}' is not a whole number of years")),
        }
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawNumber::deserialize(deserializer)?
        .as_float()
        .map_err(serde::de::Error::custom)
}

pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    raw.map(|value| value.as_float().map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn lenient_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    raw.map(|value| {
        value
            .as_count()
            .and_then(|count| {
                u32::try_from(count).map_err(|_| format!("{count} is too large a count"))
            })
            .map_err(serde::de::Error::custom)
    })
    .transpose()
}

pub(crate) fn lenient_opt_top_n<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    raw.map(|value| {
        value
            .as_count()
            .map(|count| count as usize)
            .map_err(serde::de::Error::custom)
    })
    .transpose()
}

pub(crate) fn lenient_years<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    RawNumber::deserialize(deserializer)?
        .as_years()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_opt_count")]
        bedrooms: Option<u32>,
        #[serde(default, deserialize_with = "lenient_opt_f64")]
        min_price: Option<f64>,
        #[serde(default, deserialize_with = "lenient_opt_top_n")]
        top_n: Option<usize>,
    }

    #[derive(Debug, Deserialize)]
    struct MandatoryProbe {
        #[serde(deserialize_with = "lenient_f64")]
        floor_area_sqm: f64,
        #[serde(deserialize_with = "lenient_years")]
        years: i32,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let probe: Probe =
            serde_json::from_str(r#"{"bedrooms": "3", "min_price": 250000.5, "top_n": 7}"#)
                .expect("lenient fields parse");
        assert_eq!(probe.bedrooms, Some(3));
        assert_eq!(probe.min_price, Some(250_000.5));
        assert_eq!(probe.top_n, Some(7));
    }

    #[test]
    fn string_floats_parse_for_float_fields_only() {
        let probe: Probe = serde_json::from_str(r#"{"min_price": "250000.5"}"#).expect("parses");
        assert_eq!(probe.min_price, Some(250_000.5));
        assert!(serde_json::from_str::<Probe>(r#"{"bedrooms": "2.5"}"#).is_err());
    }

    #[test]
    fn fractional_numbers_truncate_for_counts() {
        let probe: Probe = serde_json::from_str(r#"{"top_n": 5.9}"#).expect("parses");
        assert_eq!(probe.top_n, Some(5));
    }

    #[test]
    fn rejects_non_numeric_and_negative_counts() {
        assert!(serde_json::from_str::<Probe>(r#"{"bedrooms": "plenty"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"top_n": -2}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"min_price": true}"#).is_err());
    }

    #[test]
    fn missing_optional_fields_stay_absent() {
        let probe: Probe = serde_json::from_str("{}").expect("empty body parses");
        assert_eq!(probe.bedrooms, None);
        assert_eq!(probe.min_price, None);
        assert_eq!(probe.top_n, None);
    }

    #[test]
    fn mandatory_fields_are_required_and_years_may_be_negative() {
        let probe: MandatoryProbe =
            serde_json::from_str(r#"{"floor_area_sqm": "120.5", "years": -3}"#).expect("parses");
        assert_eq!(probe.floor_area_sqm, 120.5);
        assert_eq!(probe.years, -3);
        assert!(serde_json::from_str::<MandatoryProbe>(r#"{"years": 3}"#).is_err());
    }
}
