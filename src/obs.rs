//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `appnet_client.operation` with the
//!   `operation` and `stage` (call site) fields.
//! - Enable `metrics` to increment the `appnet_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// API operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiOperation {
	/// Grant exchange against the OAuth token endpoint.
	ExchangeToken,
	/// Token inspection, with either bearer or delegate credentials.
	VerifyToken,
	/// Text processing.
	ProcessText,
	/// Service configuration lookup.
	FetchConfig,
	/// Ad-hoc request issued through the generic verb helpers.
	Request,
}
impl ApiOperation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiOperation::ExchangeToken => "exchange_token",
			ApiOperation::VerifyToken => "verify_token",
			ApiOperation::ProcessText => "process_text",
			ApiOperation::FetchConfig => "fetch_config",
			ApiOperation::Request => "request",
		}
	}
}
impl Display for ApiOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span, recording the attempt and its outcome.
pub(crate) async fn observe<T, Fut>(
	operation: ApiOperation,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(operation, stage);

	record_operation_outcome(operation, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_operation_outcome(operation, OperationOutcome::Success),
		Err(_) => record_operation_outcome(operation, OperationOutcome::Failure),
	}

	result
}
