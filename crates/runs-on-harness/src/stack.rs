// crates/runs-on-harness/src/stack.rs
// ============================================================================
// Module: Stack Outputs
// Description: Output names declared by the runs-on stages.
// Purpose: Keep the output contract with the HCL fixtures in one place.
// Dependencies: runs-on-harness::deploy
// ============================================================================

//! ## Overview
//! Output names consumed from the network and module stages, plus a typed
//! view over the module-stage outputs used by validation.

use crate::deploy::OutputSet;

// ============================================================================
// SECTION: Output Names
// ============================================================================

/// Output names declared by the stages.
pub mod names {
    /// Network stage: VPC id.
    pub const VPC_ID: &str = "vpc_id";
    /// Network stage: public subnet ids.
    pub const PUBLIC_SUBNET_IDS: &str = "public_subnet_ids";
    /// Network stage: private subnet ids.
    pub const PRIVATE_SUBNET_IDS: &str = "private_subnet_ids";
    /// Module stage: stack name.
    pub const STACK_NAME: &str = "stack_name";
    /// Module stage: App Runner service host.
    pub const APP_RUNNER_URL: &str = "app_runner_url";
    /// Module stage: config bucket.
    pub const CONFIG_BUCKET: &str = "config_bucket_name";
    /// Module stage: cache bucket.
    pub const CACHE_BUCKET: &str = "cache_bucket_name";
    /// Module stage: access-logging bucket.
    pub const LOGGING_BUCKET: &str = "logging_bucket_name";
    /// Module stage: DynamoDB locks table.
    pub const LOCKS_TABLE: &str = "locks_table_name";
    /// Module stage: runner instance role.
    pub const INSTANCE_ROLE: &str = "ec2_instance_role_name";
    /// Module stage: App Runner log group.
    pub const LOG_GROUP: &str = "app_runner_log_group_name";
    /// Optional module: EFS filesystem id.
    pub const EFS_ID: &str = "efs_id";
    /// Optional module: ECR repository URL.
    pub const ECR_REPOSITORY_URL: &str = "ecr_repository_url";
    /// Optional module: ECR repository ARN.
    pub const ECR_REPOSITORY_ARN: &str = "ecr_repository_arn";
}

// ============================================================================
// SECTION: Typed View
// ============================================================================

/// Module-stage outputs used by the validation battery.
///
/// # Invariants
/// - Undeclared outputs are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackOutputs {
    /// Stack name.
    pub stack_name: String,
    /// App Runner service host.
    pub service_url: String,
    /// Config bucket.
    pub config_bucket: String,
    /// Cache bucket.
    pub cache_bucket: String,
    /// Access-logging bucket.
    pub logging_bucket: String,
    /// DynamoDB locks table.
    pub locks_table: String,
    /// Runner instance role.
    pub instance_role: String,
    /// App Runner log group.
    pub log_group: String,
    /// EFS filesystem id.
    pub efs_id: String,
    /// ECR repository URL.
    pub ecr_repository_url: String,
    /// ECR repository ARN.
    pub ecr_repository_arn: String,
}

impl StackOutputs {
    /// Reads the typed view from a module-stage output set.
    #[must_use]
    pub fn from_outputs(outputs: &OutputSet) -> Self {
        Self {
            stack_name: outputs.output(names::STACK_NAME),
            service_url: outputs.output(names::APP_RUNNER_URL),
            config_bucket: outputs.output(names::CONFIG_BUCKET),
            cache_bucket: outputs.output(names::CACHE_BUCKET),
            logging_bucket: outputs.output(names::LOGGING_BUCKET),
            locks_table: outputs.output(names::LOCKS_TABLE),
            instance_role: outputs.output(names::INSTANCE_ROLE),
            log_group: outputs.output(names::LOG_GROUP),
            efs_id: outputs.output(names::EFS_ID),
            ecr_repository_url: outputs.output(names::ECR_REPOSITORY_URL),
            ecr_repository_arn: outputs.output(names::ECR_REPOSITORY_ARN),
        }
    }
}
