pub mod acknowledge;
pub mod entry;
pub mod enumerator;
pub mod producer;
pub mod reconciler;
pub mod router;

use crate::adapters::custom_resource::CustomResourceResponder;
use crate::adapters::identity::CallerIdentity;
use crate::adapters::queue::WorkQueue;
use crate::adapters::stack_instances::StackInstanceSource;

/// External services one invocation talks to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub stack_instances: &'a dyn StackInstanceSource,
    pub queue: &'a dyn WorkQueue,
    pub identity: &'a dyn CallerIdentity,
    pub responder: &'a dyn CustomResourceResponder,
}

/// Lambda context fields the handlers need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub log_stream_name: String,
}
