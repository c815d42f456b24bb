//! Wire types exchanged with the scoring service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::dashboard::Metric;

/// A selectable scoring model, identified by `(model_type, model_version)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub model_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub model_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Map::is_empty"
    )]
    pub hyperparameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Model {
    /// Model with only the identifying fields set.
    pub fn new(model_type: impl Into<String>, model_version: impl Into<String>) -> Self {
        Self {
            model_type: model_type.into(),
            model_version: model_version.into(),
            description: None,
            hyperparameters: Map::new(),
            created_at: None,
        }
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.model_type, &self.model_version)
    }

    /// Label used in the model picker.
    pub fn display_name(&self) -> String {
        format!("{} (Version {})", self.model_type, self.model_version)
    }
}

/// The four quality scores returned for one submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl Metrics {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::F1Score => self.f1_score,
        }
    }
}

/// Response body of `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub metrics: Metrics,
    /// Per-row predictions, when the service includes them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predictions: Vec<Value>,
}

/// Metrics attached to a historical run; any field may be missing or null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    #[serde(default)]
    pub f1_score: Option<f64>,
}

impl RunMetrics {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::F1Score => self.f1_score,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub hyperparameters: Map<String, Value>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    #[serde(default)]
    pub dataset_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One past submission outcome as listed by `GET /performance_history`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub run_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub timestamp: String,
    #[serde(default)]
    pub metrics: Option<RunMetrics>,
    #[serde(default)]
    pub model_info: Option<ModelInfo>,
    #[serde(default)]
    pub dataset_info: Option<DatasetInfo>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub model_version: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub dataset_version: Option<String>,
}

impl HistoryRecord {
    /// Value of `metric` for this run, if the service reported one.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.as_ref().and_then(|metrics| metrics.get(metric))
    }
}

/// A CSV file picked for scoring, held in memory until submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

/// Errors raised while reading a picked file.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CsvUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read `path` fully into memory. The contents are not inspected.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = std::fs::read(path).map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Ok(Some(other.to_string())),
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_string_or_number(deserializer).map(Option::unwrap_or_default)
}

/// Hyperparameters arrive as an object, a JSON-encoded string, or null.
fn lenient_object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(Value::String(text)) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            _ => Map::from_iter([("value".to_string(), Value::String(text))]),
        },
        Some(other) => Map::from_iter([("value".to_string(), other)]),
    })
}
