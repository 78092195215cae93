use recorder_override_core::contract::{
    CustomResourceResponse, CUSTOM_RESOURCE_PHYSICAL_ID, CUSTOM_RESOURCE_SUCCESS,
};
use recorder_override_core::error::ProducerError;
use recorder_override_core::event::StackLifecycleCallback;
use serde_json::json;
use tracing::info;

use crate::adapters::custom_resource::CustomResourceResponder;
use crate::handlers::InvocationContext;

pub fn build_success_response(
    callback: &StackLifecycleCallback,
    invocation: &InvocationContext,
) -> CustomResourceResponse {
    CustomResourceResponse {
        status: CUSTOM_RESOURCE_SUCCESS.to_string(),
        reason: format!(
            "See the details in CloudWatch Log Stream: {}",
            invocation.log_stream_name
        ),
        physical_resource_id: CUSTOM_RESOURCE_PHYSICAL_ID.to_string(),
        stack_id: callback.stack_id.clone(),
        request_id: callback.request_id.clone(),
        logical_resource_id: callback.logical_resource_id.clone(),
        no_echo: false,
        data: json!({}),
    }
}

/// Reports SUCCESS for `callback`, whatever the outcome of processing.
pub fn acknowledge(
    responder: &dyn CustomResourceResponder,
    callback: &StackLifecycleCallback,
    invocation: &InvocationContext,
) -> Result<(), ProducerError> {
    let body = build_success_response(callback, invocation).to_body()?;
    responder
        .send_response(&callback.response_url, &body)
        .map_err(ProducerError::Acknowledgment)?;

    info!(
        component = "acknowledge",
        event = "custom_resource_acknowledged",
        request_type = %callback.request_type,
        logical_resource_id = %callback.logical_resource_id,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::RecordingResponder;

    fn callback() -> StackLifecycleCallback {
        StackLifecycleCallback {
            request_type: "Create".to_string(),
            response_url: "https://cloudformation-custom-resource-response.example/put".to_string(),
            stack_id: "arn:aws:cloudformation:us-east-1:111111111111:stack/override/abc".to_string(),
            request_id: "req-1".to_string(),
            logical_resource_id: "OverrideTrigger".to_string(),
            resource_type: Some("Custom::ConfigRecorderOverride".to_string()),
            physical_resource_id: None,
            resource_properties: None,
        }
    }

    fn invocation() -> InvocationContext {
        InvocationContext {
            request_id: "lambda-req".to_string(),
            log_stream_name: "2026/10/14/[$LATEST]abc".to_string(),
        }
    }

    #[test]
    fn success_response_echoes_request_identity() {
        let response = build_success_response(&callback(), &invocation());

        assert_eq!(response.status, "SUCCESS");
        assert_eq!(response.physical_resource_id, "CustomResourcePhysicalID");
        assert_eq!(response.request_id, "req-1");
        assert_eq!(
            response.reason,
            "See the details in CloudWatch Log Stream: 2026/10/14/[$LATEST]abc"
        );
    }

    #[test]
    fn uploads_to_presigned_response_url() {
        let responder = RecordingResponder::new();

        acknowledge(&responder, &callback(), &invocation()).expect("ack should succeed");

        let responses = responder.responses();
        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].0,
            "https://cloudformation-custom-resource-response.example/put"
        );
        assert_eq!(responses[0].1["StackId"], callback().stack_id);
    }

    #[test]
    fn upload_failure_is_an_acknowledgment_error() {
        let error = acknowledge(&RecordingResponder::failing(), &callback(), &invocation())
            .expect_err("ack should fail");
        assert_eq!(error.kind(), "acknowledgment_error");
    }
}
