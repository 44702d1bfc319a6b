//! Vendor label for aggregated validation errors.

/// Label used when no validator exposed a vendor name.
pub(super) const UNKNOWN_VENDOR: &str = "unknown";

/// Summarize the distinct vendors seen during a parse, in first-seen order.
pub(super) fn label(vendors: &[String]) -> String {
    match vendors {
        [] => UNKNOWN_VENDOR.to_string(),
        [only] => only.clone(),
        many => format!("mixed({})", many.join(",")),
    }
}
