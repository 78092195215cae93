use recorder_override_core::config::ProducerConfig;
use recorder_override_core::contract::InvocationResponse;
use recorder_override_core::error::ProducerError;
use recorder_override_core::event::{classify, InboundEvent};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::handlers::acknowledge::acknowledge;
use crate::handlers::router::route;
use crate::handlers::{Collaborators, InvocationContext};

/// Processes one invocation and always reports completion to the harness.
///
/// Failures are surfaced only through logs. When configuration cannot be
/// loaded, a custom resource request is still acknowledged so the stack
/// operation is not left waiting.
pub fn handle_invocation(
    event: Value,
    invocation: &InvocationContext,
    config: Result<ProducerConfig, ProducerError>,
    collaborators: &Collaborators<'_>,
) -> InvocationResponse {
    debug!(
        component = "entry",
        event = "invocation_received",
        request_id = %invocation.request_id,
        payload = %event,
    );

    let config = match config {
        Ok(value) => value,
        Err(failure) => {
            log_failure(&failure);
            acknowledge_unconfigured(&event, invocation, collaborators);
            return InvocationResponse::completed();
        }
    };

    info!(
        component = "entry",
        event = "configuration_loaded",
        reference_accounts = %config.reference_accounts,
        filter_policy = config.filter_policy.as_str(),
        log_level = %config.log_level,
    );

    match route(&event, &config, invocation, collaborators) {
        Ok(outcome) => info!(
            component = "entry",
            event = "execution_succeeded",
            outcome = ?outcome,
        ),
        Err(failure) => log_failure(&failure),
    }

    InvocationResponse::completed()
}

fn acknowledge_unconfigured(
    event: &Value,
    invocation: &InvocationContext,
    collaborators: &Collaborators<'_>,
) {
    if let Ok(InboundEvent::StackLifecycleCallback(callback)) = classify(event) {
        if let Err(failure) = acknowledge(collaborators.responder, &callback, invocation) {
            log_failure(&failure);
        }
    }
}

fn log_failure(failure: &ProducerError) {
    error!(
        component = "entry",
        event = "execution_failed",
        error_kind = failure.kind(),
        error = %failure,
    );
}
