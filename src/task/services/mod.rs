//! Application services for the task registry.

mod registry;

pub use registry::{
    CreateTaskRequest, HardDeleteOutcome, TaskRegistryError, TaskRegistryResult,
    TaskRegistryService, UpdateTaskRequest,
};
