// crates/runs-on-harness/src/validate/aws.rs
// ============================================================================
// Module: AWS Inspector
// Description: CloudInspector backed by the AWS SDK.
// Purpose: Run read-only S3, DynamoDB, IAM, and CloudWatch Logs describes.
// Dependencies: aws-config, aws-sdk-s3, aws-sdk-dynamodb, aws-sdk-iam,
//               aws-sdk-cloudwatchlogs
// ============================================================================

//! ## Overview
//! [`AwsInspector`] shares one SDK config across service clients. All calls
//! are describes or gets; nothing here mutates cloud state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_s3::error::DisplayErrorContext;

use super::inspector::CloudInspector;
use super::inspector::InspectError;
use super::inspector::LogGroupRetention;
use super::inspector::PublicAccessBlock;

// ============================================================================
// SECTION: Inspector
// ============================================================================

/// AWS SDK clients used for validation queries.
#[derive(Debug, Clone)]
pub struct AwsInspector {
    /// S3 client.
    s3: aws_sdk_s3::Client,
    /// DynamoDB client.
    dynamodb: aws_sdk_dynamodb::Client,
    /// IAM client.
    iam: aws_sdk_iam::Client,
    /// CloudWatch Logs client.
    logs: aws_sdk_cloudwatchlogs::Client,
}

impl AwsInspector {
    /// Loads credentials from the default provider chain for `region`.
    pub async fn from_env(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            s3: aws_sdk_s3::Client::new(&config),
            dynamodb: aws_sdk_dynamodb::Client::new(&config),
            iam: aws_sdk_iam::Client::new(&config),
            logs: aws_sdk_cloudwatchlogs::Client::new(&config),
        }
    }
}

#[async_trait]
impl CloudInspector for AwsInspector {
    async fn bucket_encryption_algorithms(&self, bucket: &str) -> Result<Vec<String>, InspectError> {
        let output = self
            .s3
            .get_bucket_encryption()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| sdk_error("GetBucketEncryption", bucket, &err))?;
        let algorithms = output
            .server_side_encryption_configuration()
            .map(|config| {
                config
                    .rules()
                    .iter()
                    .filter_map(|rule| rule.apply_server_side_encryption_by_default())
                    .map(|default| default.sse_algorithm().as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();
        Ok(algorithms)
    }

    async fn bucket_logging_target(&self, bucket: &str) -> Result<Option<String>, InspectError> {
        let output = self
            .s3
            .get_bucket_logging()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| sdk_error("GetBucketLogging", bucket, &err))?;
        Ok(output.logging_enabled().map(|logging| logging.target_bucket().to_string()))
    }

    async fn bucket_public_access_block(
        &self,
        bucket: &str,
    ) -> Result<PublicAccessBlock, InspectError> {
        let output = self
            .s3
            .get_public_access_block()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| sdk_error("GetPublicAccessBlock", bucket, &err))?;
        let Some(config) = output.public_access_block_configuration() else {
            return Ok(PublicAccessBlock::default());
        };
        Ok(PublicAccessBlock {
            block_public_acls: config.block_public_acls().unwrap_or(false),
            block_public_policy: config.block_public_policy().unwrap_or(false),
            ignore_public_acls: config.ignore_public_acls().unwrap_or(false),
            restrict_public_buckets: config.restrict_public_buckets().unwrap_or(false),
        })
    }

    async fn bucket_versioning_status(&self, bucket: &str) -> Result<Option<String>, InspectError> {
        let output = self
            .s3
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| sdk_error("GetBucketVersioning", bucket, &err))?;
        Ok(output.status().map(|status| status.as_str().to_string()))
    }

    async fn table_sse_status(&self, table: &str) -> Result<Option<String>, InspectError> {
        let output = self
            .dynamodb
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|err| sdk_error("DescribeTable", table, &err))?;
        Ok(output
            .table()
            .and_then(|description| description.sse_description())
            .and_then(|sse| sse.status())
            .map(|status| status.as_str().to_string()))
    }

    async fn attached_role_policy_arns(&self, role: &str) -> Result<Vec<String>, InspectError> {
        let mut arns = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let output = self
                .iam
                .list_attached_role_policies()
                .role_name(role)
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|err| sdk_error("ListAttachedRolePolicies", role, &err))?;
            arns.extend(
                output
                    .attached_policies()
                    .iter()
                    .filter_map(|policy| policy.policy_arn())
                    .map(str::to_string),
            );
            if !output.is_truncated() {
                break;
            }
            marker = output.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }
        Ok(arns)
    }

    async fn log_groups(&self, prefix: &str) -> Result<Vec<LogGroupRetention>, InspectError> {
        let mut groups = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .logs
                .describe_log_groups()
                .log_group_name_prefix(prefix)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|err| sdk_error("DescribeLogGroups", prefix, &err))?;
            groups.extend(output.log_groups().iter().map(|group| LogGroupRetention {
                name: group.log_group_name().unwrap_or_default().to_string(),
                retention_days: group.retention_in_days(),
            }));
            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(groups)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts an SDK error into an [`InspectError`] with full context.
fn sdk_error<E>(operation: &'static str, resource: &str, err: &E) -> InspectError
where
    E: std::error::Error,
{
    InspectError::new(operation, resource, DisplayErrorContext(err).to_string())
}
