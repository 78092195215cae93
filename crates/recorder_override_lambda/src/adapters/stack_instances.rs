use recorder_override_core::contract::StackInstance;

/// One page of a `ListStackInstances` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackInstancePage {
    pub instances: Vec<StackInstance>,
    pub next_token: Option<String>,
}

pub trait StackInstanceSource {
    fn list_stack_instances_page(
        &self,
        stack_set: &str,
        account: Option<&str>,
        next_token: Option<&str>,
    ) -> Result<StackInstancePage, String>;
}
