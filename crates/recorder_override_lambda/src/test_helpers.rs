//! In-memory collaborators for handler tests.
//!
//! Each fake records what it was asked to do behind a `Mutex` so tests can
//! assert on calls after driving a handler through shared references.

use std::sync::Mutex;

use recorder_override_core::contract::{StackInstance, WorkItem};

use crate::adapters::custom_resource::CustomResourceResponder;
use crate::adapters::identity::CallerIdentity;
use crate::adapters::queue::WorkQueue;
use crate::adapters::stack_instances::{StackInstancePage, StackInstanceSource};
use crate::handlers::Collaborators;

/// A `ListStackInstances` call as observed by [`FakeStackInstances`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCall {
    pub stack_set: String,
    pub account: Option<String>,
    pub next_token: Option<String>,
}

/// Serves `instances` in pages of `page_size`, honoring the account scope.
pub struct FakeStackInstances {
    instances: Vec<StackInstance>,
    page_size: usize,
    failure: Option<String>,
    calls: Mutex<Vec<ListCall>>,
}

impl FakeStackInstances {
    pub fn new(instances: Vec<StackInstance>) -> Self {
        Self {
            instances,
            page_size: usize::MAX,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<ListCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    /// Distinct account scopes requested, in call order, ignoring page follow-ups.
    pub fn scopes(&self) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter(|call| call.next_token.is_none())
            .map(|call| call.account)
            .collect()
    }
}

impl StackInstanceSource for FakeStackInstances {
    fn list_stack_instances_page(
        &self,
        stack_set: &str,
        account: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<StackInstancePage, String> {
        self.calls.lock().expect("poisoned mutex").push(ListCall {
            stack_set: stack_set.to_string(),
            account: account.map(str::to_string),
            next_token: next_token.map(str::to_string),
        });

        if let Some(message) = &self.failure {
            return Err(message.clone());
        }

        let matching: Vec<StackInstance> = self
            .instances
            .iter()
            .filter(|instance| match account {
                Some(scope) => instance.account == scope,
                None => true,
            })
            .cloned()
            .collect();

        let start = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| format!("invalid pagination token: {token}"))?,
            None => 0,
        };
        let end = start.saturating_add(self.page_size).min(matching.len());

        Ok(StackInstancePage {
            instances: matching[start.min(end)..end].to_vec(),
            next_token: (end < matching.len()).then(|| end.to_string()),
        })
    }
}

/// Records every message body; sends for accounts in `failing_accounts` fail.
#[derive(Default)]
pub struct RecordingQueue {
    failing_accounts: Vec<String>,
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(accounts: &[&str]) -> Self {
        Self {
            failing_accounts: accounts.iter().map(|account| account.to_string()).collect(),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn bodies(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("poisoned mutex")
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn queue_urls(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("poisoned mutex")
            .iter()
            .map(|(queue_url, _)| queue_url.clone())
            .collect()
    }

    pub fn work_items(&self) -> Vec<WorkItem> {
        self.bodies()
            .iter()
            .map(|body| serde_json::from_str(body).expect("queued body should be a work item"))
            .collect()
    }
}

impl WorkQueue for RecordingQueue {
    fn send_message(&self, queue_url: &str, body: &str) -> Result<(), String> {
        let item: WorkItem =
            serde_json::from_str(body).map_err(|error| format!("unexpected body: {error}"))?;
        if self.failing_accounts.contains(&item.account) {
            return Err(format!("simulated send failure for {}", item.account));
        }

        self.messages
            .lock()
            .expect("poisoned mutex")
            .push((queue_url.to_string(), body.to_string()));
        Ok(())
    }
}

pub struct FixedIdentity {
    account: Result<String, String>,
}

impl FixedIdentity {
    pub fn new(account: &str) -> Self {
        Self {
            account: Ok(account.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            account: Err(message.to_string()),
        }
    }
}

impl CallerIdentity for FixedIdentity {
    fn caller_account(&self) -> Result<String, String> {
        self.account.clone()
    }
}

#[derive(Default)]
pub struct RecordingResponder {
    fail: bool,
    responses: Mutex<Vec<(String, String)>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            responses: Mutex::new(Vec::new()),
        }
    }

    pub fn responses(&self) -> Vec<(String, serde_json::Value)> {
        self.responses
            .lock()
            .expect("poisoned mutex")
            .iter()
            .map(|(url, body)| {
                (
                    url.clone(),
                    serde_json::from_str(body).expect("response body should be json"),
                )
            })
            .collect()
    }
}

impl CustomResourceResponder for RecordingResponder {
    fn send_response(&self, response_url: &str, body: &str) -> Result<(), String> {
        if self.fail {
            return Err("simulated response upload failure".to_string());
        }

        self.responses
            .lock()
            .expect("poisoned mutex")
            .push((response_url.to_string(), body.to_string()));
        Ok(())
    }
}

/// Owns one of each fake so tests can borrow a [`Collaborators`] view.
pub struct FakeWorld {
    pub stack_instances: FakeStackInstances,
    pub queue: RecordingQueue,
    pub identity: FixedIdentity,
    pub responder: RecordingResponder,
}

impl FakeWorld {
    pub fn new(instances: Vec<StackInstance>, caller_account: &str) -> Self {
        Self {
            stack_instances: FakeStackInstances::new(instances),
            queue: RecordingQueue::new(),
            identity: FixedIdentity::new(caller_account),
            responder: RecordingResponder::new(),
        }
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            stack_instances: &self.stack_instances,
            queue: &self.queue,
            identity: &self.identity,
            responder: &self.responder,
        }
    }
}

/// Instances for `accounts`, each deployed in us-east-1 and eu-west-1.
pub fn two_region_instances(accounts: &[&str]) -> Vec<StackInstance> {
    accounts
        .iter()
        .flat_map(|account| {
            [
                StackInstance::new(*account, "us-east-1"),
                StackInstance::new(*account, "eu-west-1"),
            ]
        })
        .collect()
}
