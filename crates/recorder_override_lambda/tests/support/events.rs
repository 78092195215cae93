#![allow(dead_code)]

use serde_json::{json, Value};

pub const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/111111111111/config-recorder-override";
pub const RESPONSE_URL: &str =
    "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/signed";

/// Control Tower lifecycle event as delivered by EventBridge.
pub fn managed_account_event(event_name: &str, account: &str) -> Value {
    let status_field = if event_name == "CreateManagedAccount" {
        "createManagedAccountStatus"
    } else {
        "updateManagedAccountStatus"
    };

    json!({
        "version": "0",
        "id": "b8f6e0a2-1c4d-4bb4-9a43-1f1c8f0d7f1e",
        "detail-type": "AWS Service Event via CloudTrail",
        "source": "aws.controltower",
        "account": "111111111111",
        "region": "us-east-1",
        "detail": {
            "eventName": event_name,
            "eventSource": "controltower.amazonaws.com",
            "serviceEventDetails": {
                status_field: {
                    "organizationalUnit": {"organizationalUnitName": "Workloads"},
                    "account": {"accountName": "workload", "accountId": account},
                    "state": "SUCCEEDED",
                    "message": "AWS Control Tower successfully updated an enrolled account."
                }
            }
        }
    })
}

pub fn landing_zone_event() -> Value {
    json!({
        "source": "aws.controltower",
        "detail-type": "AWS Service Event via CloudTrail",
        "detail": {
            "eventName": "UpdateLandingZone",
            "serviceEventDetails": {
                "updateLandingZoneStatus": {"state": "SUCCEEDED", "landingZoneVersion": "3.3"}
            }
        }
    })
}

/// CloudFormation custom resource request for the producer's trigger resource.
pub fn custom_resource_event(request_type: &str) -> Value {
    json!({
        "RequestType": request_type,
        "ServiceToken": "arn:aws:lambda:us-east-1:111111111111:function:config-recorder-override",
        "ResponseURL": RESPONSE_URL,
        "StackId": "arn:aws:cloudformation:us-east-1:111111111111:stack/config-recorder-override/0f1e",
        "RequestId": "5d1b9a6e-7b3a-4f5e-9d53-2f0a6d3c1b21",
        "LogicalResourceId": "ProducerTrigger",
        "ResourceType": "Custom::ConfigRecorderOverride",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:us-east-1:111111111111:function:config-recorder-override"
        }
    })
}
