pub mod custom_resource;
pub mod identity;
pub mod queue;
pub mod stack_instances;
