use recorder_override_core::accounts::ReferenceAccountList;
use recorder_override_core::contract::{FanOutReport, OperationTag};
use recorder_override_core::error::ProducerError;
use recorder_override_core::filter::AccountFilterPolicy;
use tracing::{error, info};

use crate::handlers::producer::{run_override, OverrideRequest};
use crate::handlers::Collaborators;

/// Emits `Delete` work for every reference account other than the caller's.
///
/// Deletions ignore the operator's filter policy; the only account they can
/// never target is the one the producer runs in. Every account is attempted
/// even when an earlier one fails, and the first enumeration failure is
/// returned afterwards.
pub fn reconcile(
    reference: &ReferenceAccountList,
    queue_url: &str,
    collaborators: &Collaborators<'_>,
) -> Result<FanOutReport, ProducerError> {
    let caller_account = collaborators
        .identity
        .caller_account()
        .map_err(ProducerError::Identity)?;
    let protected = ReferenceAccountList::new([caller_account.as_str()]);
    let removed = reference.without(&caller_account);

    info!(
        component = "reconciler",
        event = "reconcile_started",
        caller_account = %caller_account,
        removed_accounts = %removed,
    );

    let mut report = FanOutReport::default();
    let mut first_failure = None;
    for account in removed.iter() {
        info!(
            component = "reconciler",
            event = "delete_requested",
            account,
        );
        let request = OverrideRequest {
            account: Some(account),
            tag: OperationTag::Delete,
            reference: &protected,
            policy: &AccountFilterPolicy::ExcludeListed,
        };
        match run_override(collaborators, queue_url, &request) {
            Ok(account_report) => report = report.merge(account_report),
            Err(failure) => {
                error!(
                    component = "reconciler",
                    event = "delete_failed",
                    account,
                    error_kind = failure.kind(),
                    error = %failure,
                );
                first_failure.get_or_insert(failure);
            }
        }
    }

    match first_failure {
        Some(failure) => Err(failure),
        None => Ok(report),
    }
}
