//! Commit-or-rollback boundary shared by every mutating service

use tracing::{error, warn};

use super::context::RequestContext;
use crate::domain::{BookingUnitOfWork, DomainResult};

/// Commit `uow` if `result` is `Ok`, otherwise roll it back.
///
/// Failures are logged with the operation name and caller before being
/// returned; caller mistakes at `warn`, store failures at `error`.
pub(crate) async fn finish<T>(
    uow: Box<dyn BookingUnitOfWork>,
    result: DomainResult<T>,
    ctx: &RequestContext,
    operation: &'static str,
) -> DomainResult<T> {
    match result {
        Ok(value) => match uow.commit().await {
            Ok(()) => Ok(value),
            Err(e) => {
                error!(
                    operation,
                    actor = %ctx.user_name,
                    company = %ctx.company,
                    error = %e,
                    "Commit failed"
                );
                metrics::counter!("atl_operation_failures_total", "operation" => operation)
                    .increment(1);
                Err(e)
            }
        },
        Err(e) => {
            if let Err(rb) = uow.rollback().await {
                error!(operation, error = %rb, "Rollback failed");
            }
            if e.is_rejection() {
                warn!(
                    operation,
                    actor = %ctx.user_name,
                    company = %ctx.company,
                    error = %e,
                    "Operation rejected"
                );
            } else {
                error!(
                    operation,
                    actor = %ctx.user_name,
                    company = %ctx.company,
                    error = %e,
                    "Operation failed, rolled back"
                );
            }
            metrics::counter!("atl_operation_failures_total", "operation" => operation)
                .increment(1);
            Err(e)
        }
    }
}
