use crate::dashboard::Metric;

pub(super) const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub(super) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(super) const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
pub(super) const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 30;
pub(super) const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

pub(super) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(super) fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

pub(super) fn default_read_timeout_secs() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}

pub(super) fn default_write_timeout_secs() -> u64 {
    DEFAULT_WRITE_TIMEOUT_SECS
}

pub(super) fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_metric() -> Metric {
    Metric::Accuracy
}

/// Zero means "unset" for every numeric knob.
pub(super) fn or_default<T: PartialEq + Default>(value: T, fallback: T) -> T {
    if value == T::default() { fallback } else { value }
}
