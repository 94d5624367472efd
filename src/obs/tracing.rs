// self
use crate::{_prelude::*, obs::StorageOp};

/// Future returned by [`instrument_op`]; the bare future when `tracing` is disabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`instrument_op`]; the bare future when `tracing` is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// Attaches the `oauth2_storage.op` span to an async adapter operation.
///
/// The span is entered on every poll, so no guard lives across `.await` points.
pub fn instrument_op<Fut>(op: StorageOp, fut: Fut) -> InstrumentedOp<Fut>
where
	Fut: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		fut.instrument(op_span(op))
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = op;

		fut
	}
}

/// Runs a synchronous adapter operation inside the `oauth2_storage.op` span.
pub fn in_op_span<T>(op: StorageOp, f: impl FnOnce() -> T) -> T {
	#[cfg(feature = "tracing")]
	{
		op_span(op).in_scope(f)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = op;

		f()
	}
}

/// Emits a `debug` event when an unknown-user lookup is turned into invalid credentials.
pub fn trace_unknown_user(op: StorageOp) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(op = op.as_str(), "identity provider reported an unknown user");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = op;
	}
}

#[cfg(feature = "tracing")]
fn op_span(op: StorageOp) -> tracing::Span {
	tracing::info_span!("oauth2_storage.op", op = op.as_str())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn in_op_span_returns_closure_value() {
		let value = in_op_span(StorageOp::CheckClientCredentials, || "dummy".len());

		assert_eq!(value, 5);

		trace_unknown_user(StorageOp::CheckUserCredentials);
	}

	#[tokio::test]
	async fn instrument_op_preserves_output() {
		let value = instrument_op(StorageOp::GetAccessToken, async { 42 }).await;

		assert_eq!(value, 42);
	}
}
