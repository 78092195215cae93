use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProducerError;

/// Stack-set deployed by Control Tower into every enrolled account and region.
pub const BASELINE_CONFIG_STACK_SET: &str = "AWSControlTowerBP-BASELINE-CONFIG";
pub const CONTROL_TOWER_SOURCE: &str = "aws.controltower";
pub const CUSTOM_RESOURCE_PHYSICAL_ID: &str = "CustomResourcePhysicalID";
pub const CUSTOM_RESOURCE_SUCCESS: &str = "SUCCESS";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackInstance {
    pub account: String,
    pub region: String,
}

impl StackInstance {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }
}

/// Operation carried in the `Event` field of each work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationTag {
    #[serde(rename = "controltower")]
    ControlTower,
    Create,
    Update,
    Delete,
}

impl OperationTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ControlTower => "controltower",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for OperationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of downstream work, published as a single SQS message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Event")]
    pub event: OperationTag,
}

impl WorkItem {
    pub fn for_instance(instance: &StackInstance, event: OperationTag) -> Self {
        Self {
            account: instance.account.clone(),
            region: instance.region.clone(),
            event,
        }
    }

    pub fn to_message_body(&self) -> Result<String, ProducerError> {
        serde_json::to_string(self).map_err(|error| ProducerError::Serialization {
            what: "work item",
            message: error.to_string(),
        })
    }
}

/// Counts for one enumerate-filter-publish pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub instances: usize,
    pub sent: usize,
    pub excluded: usize,
    pub failed: usize,
}

impl FanOutReport {
    pub fn merge(self, other: FanOutReport) -> FanOutReport {
        FanOutReport {
            instances: self.instances + other.instances,
            sent: self.sent + other.sent,
            excluded: self.excluded + other.excluded,
            failed: self.failed + other.failed,
        }
    }

    pub fn into_result(self) -> Result<FanOutReport, ProducerError> {
        if self.failed > 0 {
            return Err(ProducerError::Delivery {
                failed: self.failed,
                attempted: self.sent + self.failed,
            });
        }
        Ok(self)
    }
}

/// Body PUT to the presigned `ResponseURL` of a custom resource request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: String,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: Value,
}

impl CustomResourceResponse {
    pub fn to_body(&self) -> Result<String, ProducerError> {
        serde_json::to_string(self).map_err(|error| ProducerError::Serialization {
            what: "custom resource response",
            message: error.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl InvocationResponse {
    pub fn completed() -> Self {
        Self { status_code: 200 }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn work_item_uses_downstream_field_names() {
        let item = WorkItem::for_instance(
            &StackInstance::new("111122223333", "eu-west-1"),
            OperationTag::ControlTower,
        );

        let body = item.to_message_body().expect("work item should serialize");
        let value: Value = serde_json::from_str(&body).expect("body should be json");
        assert_eq!(
            value,
            json!({"Account": "111122223333", "Region": "eu-west-1", "Event": "controltower"})
        );
    }

    #[test]
    fn work_item_escapes_special_characters() {
        let item = WorkItem {
            account: "12\"34".to_string(),
            region: "us-east-1\n".to_string(),
            event: OperationTag::Delete,
        };

        let body = item.to_message_body().expect("work item should serialize");
        let parsed: WorkItem = serde_json::from_str(&body).expect("body should stay valid json");
        assert_eq!(parsed, item);
    }

    #[test]
    fn operation_tags_render_as_wire_strings() {
        let rendered: Vec<&str> = [
            OperationTag::ControlTower,
            OperationTag::Create,
            OperationTag::Update,
            OperationTag::Delete,
        ]
        .into_iter()
        .map(OperationTag::as_str)
        .collect();
        assert_eq!(rendered, vec!["controltower", "Create", "Update", "Delete"]);
    }

    #[test]
    fn report_with_failures_becomes_delivery_error() {
        let report = FanOutReport {
            instances: 3,
            sent: 2,
            excluded: 0,
            failed: 1,
        };

        assert_eq!(
            report.into_result(),
            Err(ProducerError::Delivery {
                failed: 1,
                attempted: 3
            })
        );
    }

    #[test]
    fn custom_resource_response_is_pascal_case() {
        let response = CustomResourceResponse {
            status: CUSTOM_RESOURCE_SUCCESS.to_string(),
            reason: "See the details in CloudWatch Log Stream: stream".to_string(),
            physical_resource_id: CUSTOM_RESOURCE_PHYSICAL_ID.to_string(),
            stack_id: "stack".to_string(),
            request_id: "request".to_string(),
            logical_resource_id: "OverrideTrigger".to_string(),
            no_echo: false,
            data: json!({}),
        };

        let value: Value =
            serde_json::from_str(&response.to_body().expect("response should serialize"))
                .expect("body should be json");
        assert_eq!(value["Status"], "SUCCESS");
        assert_eq!(value["PhysicalResourceId"], "CustomResourcePhysicalID");
        assert_eq!(value["LogicalResourceId"], "OverrideTrigger");
        assert_eq!(value["NoEcho"], false);
        assert_eq!(value["Data"], json!({}));
    }
}
