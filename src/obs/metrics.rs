// self
use crate::{
	_prelude::*,
	obs::{OpOutcome, StorageOp},
};

/// Increments `oauth2_storage_op_total` for `op` + `outcome` (no-op without `metrics`).
pub fn record_op_outcome(op: StorageOp, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_storage_op_total",
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, outcome);
	}
}

/// Records the terminal outcome of an operation from its result.
///
/// Negative answers (`None`, `false`, invalid credentials) are successes; only `Err` counts as a
/// failure.
pub fn record_op_result<T>(op: StorageOp, result: &Result<T>) -> OpOutcome {
	let outcome = if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure };

	record_op_outcome(op, outcome);

	outcome
}
