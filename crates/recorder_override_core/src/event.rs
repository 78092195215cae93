//! Classification of raw Lambda payloads.
//!
//! Two trigger shapes reach the producer: Control Tower lifecycle events from
//! EventBridge (recognized by a `source` field) and CloudFormation custom
//! resource callbacks (recognized by `LogicalResourceId`). Presence is checked
//! in that order; anything else is unrecognized and handled as a no-op.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::CONTROL_TOWER_SOURCE;
use crate::error::ProducerError;

pub const CREATE_MANAGED_ACCOUNT: &str = "CreateManagedAccount";
pub const UPDATE_MANAGED_ACCOUNT: &str = "UpdateManagedAccount";
pub const UPDATE_LANDING_ZONE: &str = "UpdateLandingZone";

#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    LifecycleNotification(LifecycleNotification),
    StackLifecycleCallback(StackLifecycleCallback),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleNotification {
    pub source: String,
    pub event_name: Option<String>,
    pub detail: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackLifecycleCallback {
    pub request_type: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackRequest {
    Create,
    Update,
    Delete,
    Other(String),
}

impl StackLifecycleCallback {
    pub fn request(&self) -> StackRequest {
        match self.request_type.as_str() {
            "Create" => StackRequest::Create,
            "Update" => StackRequest::Update,
            "Delete" => StackRequest::Delete,
            other => StackRequest::Other(other.to_string()),
        }
    }
}

/// What a Control Tower notification asks the producer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingZoneAction {
    SingleAccount { event_name: String, account: String },
    AllAccounts { event_name: String },
    Ignore { reason: String },
}

pub fn classify(event: &Value) -> Result<InboundEvent, ProducerError> {
    let Some(object) = event.as_object() else {
        return Ok(InboundEvent::Unrecognized);
    };

    if let Some(source) = object.get("source") {
        // Non-string sources are kept verbatim so they are ignored as foreign.
        let source = match source.as_str() {
            Some(text) => text.to_string(),
            None => source.to_string(),
        };
        let detail = object.get("detail").cloned().unwrap_or(Value::Null);
        let event_name = detail
            .get("eventName")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Ok(InboundEvent::LifecycleNotification(LifecycleNotification {
            source,
            event_name,
            detail,
        }));
    }

    if object.contains_key("LogicalResourceId") {
        let callback = serde_json::from_value::<StackLifecycleCallback>(event.clone())
            .map_err(|error| {
                ProducerError::MalformedEvent(format!("invalid custom resource request: {error}"))
            })?;
        return Ok(InboundEvent::StackLifecycleCallback(callback));
    }

    Ok(InboundEvent::Unrecognized)
}

impl LifecycleNotification {
    pub fn action(&self) -> Result<LandingZoneAction, ProducerError> {
        if self.source != CONTROL_TOWER_SOURCE {
            return Ok(LandingZoneAction::Ignore {
                reason: format!("unsupported event source {}", self.source),
            });
        }

        let Some(event_name) = self.event_name.as_deref() else {
            return Ok(LandingZoneAction::Ignore {
                reason: "event has no detail.eventName".to_string(),
            });
        };

        let status_field = match event_name {
            CREATE_MANAGED_ACCOUNT => "createManagedAccountStatus",
            UPDATE_MANAGED_ACCOUNT => "updateManagedAccountStatus",
            UPDATE_LANDING_ZONE => {
                return Ok(LandingZoneAction::AllAccounts {
                    event_name: event_name.to_string(),
                });
            }
            other => {
                return Ok(LandingZoneAction::Ignore {
                    reason: format!("no action for event {other}"),
                });
            }
        };

        let account = self
            .detail
            .pointer(&format!(
                "/serviceEventDetails/{status_field}/account/accountId"
            ))
            .and_then(Value::as_str)
            .filter(|account| !account.trim().is_empty())
            .ok_or_else(|| {
                ProducerError::MalformedEvent(format!(
                    "{event_name} event is missing serviceEventDetails.{status_field}.account.accountId"
                ))
            })?;

        Ok(LandingZoneAction::SingleAccount {
            event_name: event_name.to_string(),
            account: account.to_string(),
        })
    }
}
