use std::collections::HashSet;

use recorder_override_core::contract::StackInstance;
use recorder_override_core::error::ProducerError;
use tracing::debug;

use crate::adapters::stack_instances::StackInstanceSource;

/// Lists every stack instance of `stack_set`, optionally scoped to one account.
///
/// All pages are drained before returning so callers never observe
/// pagination state. A failed page aborts the whole enumeration.
pub fn enumerate_stack_instances(
    source: &dyn StackInstanceSource,
    stack_set: &str,
    account: Option<&str>,
) -> Result<Vec<StackInstance>, ProducerError> {
    let scope = account.filter(|value| !value.trim().is_empty());
    let enumeration_error = |message: String| ProducerError::Enumeration {
        stack_set: stack_set.to_string(),
        message,
    };

    let mut instances = Vec::new();
    let mut next_token: Option<String> = None;
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = source
            .list_stack_instances_page(stack_set, scope, next_token.as_deref())
            .map_err(enumeration_error)?;
        pages += 1;
        instances.extend(page.instances);

        match page.next_token {
            Some(token) if !token.is_empty() => {
                if !seen_tokens.insert(token.clone()) {
                    return Err(enumeration_error(format!(
                        "pagination token {token} repeated"
                    )));
                }
                next_token = Some(token);
            }
            _ => break,
        }
    }

    debug!(
        component = "enumerator",
        event = "stack_instances_listed",
        stack_set,
        account = scope.unwrap_or("*"),
        pages,
        instances = instances.len(),
    );
    Ok(instances)
}
