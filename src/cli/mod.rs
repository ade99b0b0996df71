pub mod orchestration;

pub use orchestration::{
    run_bump_workflow, run_tag_workflow, BumpWorkflowArgs, Severity, TagWorkflowArgs,
    WorkflowOutcome,
};
