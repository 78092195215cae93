use recorder_override_core::accounts::ReferenceAccountList;
use recorder_override_core::contract::{
    FanOutReport, OperationTag, StackInstance, WorkItem, BASELINE_CONFIG_STACK_SET,
};
use recorder_override_core::error::ProducerError;
use recorder_override_core::filter::{evaluate, AccountFilterPolicy, FilterDecision};
use tracing::{error, info, warn};

use crate::adapters::queue::WorkQueue;
use crate::handlers::enumerator::enumerate_stack_instances;
use crate::handlers::Collaborators;

/// Inputs for one enumerate, filter and publish pass.
#[derive(Debug, Clone, Copy)]
pub struct OverrideRequest<'a> {
    pub account: Option<&'a str>,
    pub tag: OperationTag,
    pub reference: &'a ReferenceAccountList,
    pub policy: &'a AccountFilterPolicy,
}

pub fn publish_work_item(
    queue: &dyn WorkQueue,
    queue_url: &str,
    item: &WorkItem,
) -> Result<(), ProducerError> {
    let body = item.to_message_body()?;
    queue
        .send_message(queue_url, &body)
        .map_err(|message| ProducerError::Send {
            account: item.account.clone(),
            region: item.region.clone(),
            message,
        })?;

    info!(
        component = "producer",
        event = "work_item_sent",
        account = %item.account,
        region = %item.region,
        tag = %item.event,
        body = %body,
    );
    Ok(())
}

/// Publishes one work item per eligible instance.
///
/// Sends are isolated: a failed send is logged and counted, and the remaining
/// instances are still processed.
pub fn fan_out(
    queue: &dyn WorkQueue,
    queue_url: &str,
    instances: &[StackInstance],
    request: &OverrideRequest<'_>,
) -> FanOutReport {
    let mut report = FanOutReport {
        instances: instances.len(),
        ..FanOutReport::default()
    };

    for instance in instances {
        match evaluate(&instance.account, request.reference, request.policy) {
            FilterDecision::Eligible => {
                let item = WorkItem::for_instance(instance, request.tag);
                match publish_work_item(queue, queue_url, &item) {
                    Ok(()) => report.sent += 1,
                    Err(failure) => {
                        report.failed += 1;
                        error!(
                            component = "producer",
                            event = "work_item_failed",
                            error_kind = failure.kind(),
                            error = %failure,
                        );
                    }
                }
            }
            FilterDecision::Excluded => {
                report.excluded += 1;
                info!(
                    component = "producer",
                    event = "account_excluded",
                    account = %instance.account,
                    region = %instance.region,
                    policy = request.policy.as_str(),
                );
            }
            FilterDecision::UnsupportedPolicy => {
                report.excluded += 1;
                warn!(
                    component = "producer",
                    event = "unsupported_policy",
                    account = %instance.account,
                    policy = request.policy.as_str(),
                    "unsupported filter policy, no action taken"
                );
            }
        }
    }

    report
}

/// Runs the baseline stack-set enumeration and fans the result out.
///
/// Only enumeration failures are returned as errors; delivery failures are
/// reported through the `failed` count.
pub fn run_override(
    collaborators: &Collaborators<'_>,
    queue_url: &str,
    request: &OverrideRequest<'_>,
) -> Result<FanOutReport, ProducerError> {
    let instances = enumerate_stack_instances(
        collaborators.stack_instances,
        BASELINE_CONFIG_STACK_SET,
        request.account,
    )?;
    let report = fan_out(collaborators.queue, queue_url, &instances, request);

    info!(
        component = "producer",
        event = "override_dispatched",
        account = request.account.unwrap_or("*"),
        tag = %request.tag,
        instances = report.instances,
        sent = report.sent,
        excluded = report.excluded,
        failed = report.failed,
    );
    Ok(report)
}
