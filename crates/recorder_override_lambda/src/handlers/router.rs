//! Routes one classified event to the enumerate, filter and publish chain.

use recorder_override_core::config::ProducerConfig;
use recorder_override_core::contract::{FanOutReport, OperationTag};
use recorder_override_core::error::ProducerError;
use recorder_override_core::event::{
    classify, InboundEvent, LandingZoneAction, LifecycleNotification, StackLifecycleCallback,
    StackRequest,
};
use serde_json::Value;
use tracing::{error, info};

use crate::handlers::acknowledge::acknowledge;
use crate::handlers::producer::{run_override, OverrideRequest};
use crate::handlers::reconciler::reconcile;
use crate::handlers::{Collaborators, InvocationContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Ignored {
        reason: String,
    },
    Dispatched {
        tag: OperationTag,
        report: FanOutReport,
    },
    Acknowledged {
        request_type: String,
        report: FanOutReport,
    },
}

pub fn route(
    event: &Value,
    config: &ProducerConfig,
    invocation: &InvocationContext,
    collaborators: &Collaborators<'_>,
) -> Result<RouteOutcome, ProducerError> {
    match classify(event)? {
        InboundEvent::LifecycleNotification(notification) => {
            route_notification(&notification, config, collaborators)
        }
        InboundEvent::StackLifecycleCallback(callback) => {
            route_callback(&callback, config, invocation, collaborators)
        }
        InboundEvent::Unrecognized => {
            info!(
                component = "router",
                event = "event_ignored",
                "no matching event shape found"
            );
            Ok(RouteOutcome::Ignored {
                reason: "no matching event shape".to_string(),
            })
        }
    }
}

fn route_notification(
    notification: &LifecycleNotification,
    config: &ProducerConfig,
    collaborators: &Collaborators<'_>,
) -> Result<RouteOutcome, ProducerError> {
    info!(
        component = "router",
        event = "lifecycle_notification_received",
        source = %notification.source,
        event_name = notification.event_name.as_deref().unwrap_or(""),
    );

    let account = match notification.action()? {
        LandingZoneAction::SingleAccount {
            event_name,
            account,
        } => {
            info!(
                component = "router",
                event = "override_single_account",
                event_name = %event_name,
                account = %account,
            );
            Some(account)
        }
        LandingZoneAction::AllAccounts { event_name } => {
            info!(
                component = "router",
                event = "override_all_accounts",
                event_name = %event_name,
            );
            None
        }
        LandingZoneAction::Ignore { reason } => {
            info!(
                component = "router",
                event = "event_ignored",
                reason = %reason,
                "no action taken"
            );
            return Ok(RouteOutcome::Ignored { reason });
        }
    };

    let request = OverrideRequest {
        account: account.as_deref(),
        tag: OperationTag::ControlTower,
        reference: &config.reference_accounts,
        policy: &config.filter_policy,
    };
    let report = run_override(collaborators, &config.queue_url, &request)?.into_result()?;
    Ok(RouteOutcome::Dispatched {
        tag: OperationTag::ControlTower,
        report,
    })
}

fn route_callback(
    callback: &StackLifecycleCallback,
    config: &ProducerConfig,
    invocation: &InvocationContext,
    collaborators: &Collaborators<'_>,
) -> Result<RouteOutcome, ProducerError> {
    info!(
        component = "router",
        event = "custom_resource_received",
        request_type = %callback.request_type,
        logical_resource_id = %callback.logical_resource_id,
    );

    let processed = match callback.request() {
        StackRequest::Create => override_all(OperationTag::Create, config, collaborators),
        StackRequest::Update => {
            let overridden = override_all(OperationTag::Update, config, collaborators);
            let reconciled = reconcile(
                &config.reference_accounts,
                &config.queue_url,
                collaborators,
            )
            .and_then(FanOutReport::into_result);
            combine(overridden, reconciled)
        }
        StackRequest::Delete => override_all(OperationTag::Delete, config, collaborators),
        StackRequest::Other(request_type) => {
            info!(
                component = "router",
                event = "request_type_unsupported",
                request_type = %request_type,
                "acknowledging without action"
            );
            Ok(FanOutReport::default())
        }
    };

    let acknowledged = acknowledge(collaborators.responder, callback, invocation);
    let report = combine(processed, acknowledged.map(|()| FanOutReport::default()))?;
    Ok(RouteOutcome::Acknowledged {
        request_type: callback.request_type.clone(),
        report,
    })
}

fn override_all(
    tag: OperationTag,
    config: &ProducerConfig,
    collaborators: &Collaborators<'_>,
) -> Result<FanOutReport, ProducerError> {
    let request = OverrideRequest {
        account: None,
        tag,
        reference: &config.reference_accounts,
        policy: &config.filter_policy,
    };
    run_override(collaborators, &config.queue_url, &request)?.into_result()
}

/// Merges two independent steps; the first error wins and a second one is logged.
fn combine(
    first: Result<FanOutReport, ProducerError>,
    second: Result<FanOutReport, ProducerError>,
) -> Result<FanOutReport, ProducerError> {
    match (first, second) {
        (Ok(left), Ok(right)) => Ok(left.merge(right)),
        (Err(failure), Ok(_)) | (Ok(_), Err(failure)) => Err(failure),
        (Err(failure), Err(secondary)) => {
            error!(
                component = "router",
                event = "secondary_failure",
                error_kind = secondary.kind(),
                error = %secondary,
            );
            Err(failure)
        }
    }
}
