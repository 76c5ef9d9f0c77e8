//! Run an audit against a raw artifact bag

use super::{Audit, AuditContext, AuditResult};
use crate::artifacts::{ArtifactBag, Artifacts};
use crate::error::AuditError;
use tracing::Instrument;

/// Validate the bag, run `audit` and normalize the outcome
///
/// Any failure (missing artifact, metric error) becomes an error-mode
/// [`AuditResult`] rather than an `Err`, so one failed audit never hides the
/// reason it failed.
pub async fn run_audit<A>(audit: &A, bag: &ArtifactBag, ctx: &AuditContext) -> AuditResult
where
    A: Audit + ?Sized,
{
    let meta = audit.meta();
    let span = tracing::info_span!("audit", id = %meta.id);

    async {
        let outcome = match Artifacts::from_bag(bag, &meta.required_artifacts) {
            Ok(artifacts) => audit.audit(&artifacts, ctx).await,
            Err(err) => Err(AuditError::from(err)),
        };

        match outcome {
            Ok(report) => {
                tracing::info!(
                    not_applicable = report.not_applicable,
                    rows = report.details.items.len(),
                    "audit completed"
                );
                AuditResult::from_report(&meta, report)
            }
            Err(err) => {
                tracing::warn!("audit {} failed: {}", meta.id, err);
                AuditResult::from_error(&meta, &err)
            }
        }
    }
    .instrument(span)
    .await
}
