use dioxus::prelude::*;
use shared_types::FeatureFlags;

/// Get the current feature flags. No session required; flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}
