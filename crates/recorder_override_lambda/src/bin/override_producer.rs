use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::operation::list_stack_instances::ListStackInstancesOutput;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use recorder_override_core::config::{log_level_from_lookup, ProducerConfig};
use recorder_override_core::contract::{InvocationResponse, StackInstance};
use recorder_override_lambda::adapters::custom_resource::CustomResourceResponder;
use recorder_override_lambda::adapters::identity::CallerIdentity;
use recorder_override_lambda::adapters::queue::WorkQueue;
use recorder_override_lambda::adapters::stack_instances::{StackInstancePage, StackInstanceSource};
use recorder_override_lambda::handlers::entry::handle_invocation;
use recorder_override_lambda::handlers::{Collaborators, InvocationContext};
use recorder_override_lambda::logging::init_logging;
use serde_json::Value;
use tracing::warn;

struct CloudFormationStackInstances {
    client: aws_sdk_cloudformation::Client,
}

impl StackInstanceSource for CloudFormationStackInstances {
    fn list_stack_instances_page(
        &self,
        stack_set: &str,
        account: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<StackInstancePage, String> {
        let client = self.client.clone();
        let stack_set_name = stack_set.to_string();
        let stack_instance_account = account.map(str::to_string);
        let next_token = next_token.map(str::to_string);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .list_stack_instances()
                    .stack_set_name(stack_set_name)
                    .set_stack_instance_account(stack_instance_account)
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map(page_from_output)
                    .map_err(|error| {
                        format!(
                            "failed to list stack instances: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

fn page_from_output(output: ListStackInstancesOutput) -> StackInstancePage {
    let instances = output
        .summaries()
        .iter()
        .filter_map(|summary| match (summary.account(), summary.region()) {
            (Some(account), Some(region)) => Some(StackInstance::new(account, region)),
            (account, region) => {
                warn!(
                    component = "enumerator",
                    event = "incomplete_stack_instance",
                    account = account.unwrap_or(""),
                    region = region.unwrap_or(""),
                    "skipping stack instance without account or region"
                );
                None
            }
        })
        .collect();

    StackInstancePage {
        instances,
        next_token: output.next_token().map(str::to_string),
    }
}

struct SqsWorkQueue {
    client: aws_sdk_sqs::Client,
}

impl WorkQueue for SqsWorkQueue {
    fn send_message(&self, queue_url: &str, body: &str) -> Result<(), String> {
        let client = self.client.clone();
        let target_queue_url = queue_url.to_string();
        let message_body = body.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(target_queue_url)
                    .message_body(message_body)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to send message to sqs: {}",
                            aws_sdk_sqs::error::DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

struct StsCallerIdentity {
    client: aws_sdk_sts::Client,
}

impl CallerIdentity for StsCallerIdentity {
    fn caller_account(&self) -> Result<String, String> {
        let client = self.client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client.get_caller_identity().send().await.map_err(|error| {
                    format!(
                        "failed to get caller identity: {}",
                        aws_sdk_sts::error::DisplayErrorContext(&error)
                    )
                })?;
                output
                    .account()
                    .map(str::to_string)
                    .ok_or_else(|| "caller identity has no account".to_string())
            })
        })
    }
}

struct HttpCustomResourceResponder {
    http_client: reqwest::Client,
}

impl CustomResourceResponder for HttpCustomResourceResponder {
    fn send_response(&self, response_url: &str, body: &str) -> Result<(), String> {
        let client = self.http_client.clone();
        let url = response_url.to_string();
        let payload = body.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                // The presigned URL is signed for an empty content type.
                client
                    .put(url)
                    .header(reqwest::header::CONTENT_TYPE, "")
                    .body(payload)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map(|_| ())
                    .map_err(|error| format!("failed to upload custom resource response: {error}"))
            })
        })
    }
}

struct RuntimeDependencies {
    stack_instances: CloudFormationStackInstances,
    queue: SqsWorkQueue,
    identity: StsCallerIdentity,
    responder: HttpCustomResourceResponder,
}

impl RuntimeDependencies {
    fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            stack_instances: &self.stack_instances,
            queue: &self.queue,
            identity: &self.identity,
            responder: &self.responder,
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<InvocationResponse, Error> {
    let invocation = InvocationContext {
        request_id: event.context.request_id.clone(),
        log_stream_name: event.context.env_config.log_stream.clone(),
    };
    let config = ProducerConfig::from_lookup(env_lookup);

    Ok(handle_invocation(
        event.payload,
        &invocation,
        config,
        &deps.collaborators(),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging(&log_level_from_lookup(&env_lookup));

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        stack_instances: CloudFormationStackInstances {
            client: aws_sdk_cloudformation::Client::new(&aws_config),
        },
        queue: SqsWorkQueue {
            client: aws_sdk_sqs::Client::new(&aws_config),
        },
        identity: StsCallerIdentity {
            client: aws_sdk_sts::Client::new(&aws_config),
        },
        responder: HttpCustomResourceResponder {
            http_client: reqwest::Client::new(),
        },
    };

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
