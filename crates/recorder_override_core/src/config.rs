use crate::accounts::ReferenceAccountList;
use crate::error::ProducerError;
use crate::filter::AccountFilterPolicy;

pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
pub const QUEUE_URL_KEY: &str = "SQS_URL";
pub const ACCOUNTS_LIST_KEY: &str = "ACCOUNTS_LIST";
pub const FILTER_POLICY_KEY: &str = "ACTION";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Per-invocation settings, built once at the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConfig {
    pub queue_url: String,
    pub reference_accounts: ReferenceAccountList,
    pub filter_policy: AccountFilterPolicy,
    pub log_level: String,
}

impl ProducerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProducerError> {
        let queue_url = lookup(QUEUE_URL_KEY)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ProducerError::Config(format!("{QUEUE_URL_KEY} must be configured")))?;

        let reference_accounts = match lookup(ACCOUNTS_LIST_KEY) {
            Some(text) => ReferenceAccountList::parse(&text)?,
            None => ReferenceAccountList::default(),
        };

        let filter_policy = AccountFilterPolicy::parse(&lookup(FILTER_POLICY_KEY).unwrap_or_default());

        Ok(Self {
            queue_url,
            reference_accounts,
            filter_policy,
            log_level: log_level_from_lookup(&lookup),
        })
    }
}

/// Translates the deployment's `LOG_LEVEL` into a `tracing` filter directive.
pub fn log_level_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> String {
    let raw = lookup(LOG_LEVEL_KEY).unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => DEFAULT_LOG_LEVEL.to_string(),
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn builds_config_from_deployment_variables() {
        let config = ProducerConfig::from_lookup(lookup_from(&[
            ("SQS_URL", "https://sqs.us-east-1.amazonaws.com/111111111111/override"),
            ("ACCOUNTS_LIST", "['222222222222']"),
            ("ACTION", "EXCLUDEACCOUNTS"),
            ("LOG_LEVEL", "WARNING"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.queue_url,
            "https://sqs.us-east-1.amazonaws.com/111111111111/override"
        );
        assert_eq!(
            config.reference_accounts,
            ReferenceAccountList::new(["222222222222"])
        );
        assert_eq!(config.filter_policy, AccountFilterPolicy::ExcludeListed);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn missing_queue_url_is_a_configuration_error() {
        let error = ProducerConfig::from_lookup(lookup_from(&[("SQS_URL", "  ")]))
            .expect_err("blank queue url should fail");
        assert_eq!(error, ProducerError::Config("SQS_URL must be configured".to_string()));
    }

    #[test]
    fn optional_settings_fall_back() {
        let config = ProducerConfig::from_lookup(lookup_from(&[("SQS_URL", "queue")]))
            .expect("config should load");

        assert!(config.reference_accounts.is_empty());
        assert_eq!(
            config.filter_policy,
            AccountFilterPolicy::Unrecognized(String::new())
        );
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn unparseable_account_list_is_rejected() {
        let error = ProducerConfig::from_lookup(lookup_from(&[
            ("SQS_URL", "queue"),
            ("ACCOUNTS_LIST", "['111"),
        ]))
        .expect_err("broken list should fail");
        assert_eq!(error.kind(), "configuration_error");
    }
}
