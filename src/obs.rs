//! Optional observability helpers for adapter operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_storage.op` with the `op` field
//!   (operation label), plus a `debug` event whenever an unknown-user lookup is absorbed.
//! - Enable `metrics` to increment the `oauth2_storage_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Adapter operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageOp {
	/// Client lookup by public id.
	GetClient,
	/// Client secret comparison.
	CheckClientCredentials,
	/// Access-token lookup.
	GetAccessToken,
	/// Access-token issuance.
	CreateAccessToken,
	/// Refresh-token lookup.
	GetRefreshToken,
	/// Refresh-token issuance.
	CreateRefreshToken,
	/// Refresh-token removal.
	UnsetRefreshToken,
	/// Grant-type restriction check.
	CheckRestrictedGrantType,
	/// Resource-owner password check.
	CheckUserCredentials,
	/// Authorization-code issuance.
	CreateAuthCode,
	/// Authorization-code lookup.
	GetAuthCode,
	/// Authorization-code consumption.
	MarkAuthCodeAsUsed,
}
impl StorageOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StorageOp::GetClient => "get_client",
			StorageOp::CheckClientCredentials => "check_client_credentials",
			StorageOp::GetAccessToken => "get_access_token",
			StorageOp::CreateAccessToken => "create_access_token",
			StorageOp::GetRefreshToken => "get_refresh_token",
			StorageOp::CreateRefreshToken => "create_refresh_token",
			StorageOp::UnsetRefreshToken => "unset_refresh_token",
			StorageOp::CheckRestrictedGrantType => "check_restricted_grant_type",
			StorageOp::CheckUserCredentials => "check_user_credentials",
			StorageOp::CreateAuthCode => "create_auth_code",
			StorageOp::GetAuthCode => "get_auth_code",
			StorageOp::MarkAuthCodeAsUsed => "mark_auth_code_as_used",
		}
	}
}
impl Display for StorageOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to an adapter operation.
	Attempt,
	/// Operation returned without an error (negative answers included).
	Success,
	/// Error propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs an async operation inside its span, recording attempt + outcome.
pub(crate) async fn observe<T, Fut>(op: StorageOp, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	record_op_outcome(op, OpOutcome::Attempt);

	let result = instrument_op(op, fut).await;

	record_op_result(op, &result);

	result
}

/// Synchronous counterpart of [`observe`].
pub(crate) fn observe_sync<T>(op: StorageOp, f: impl FnOnce() -> Result<T>) -> Result<T> {
	in_op_span(op, || {
		record_op_outcome(op, OpOutcome::Attempt);

		let result = f();

		record_op_result(op, &result);

		result
	})
}
