// self
#[cfg(feature = "tracing")] use crate::obs::OpOutcome;
use crate::{_prelude::*, obs::SessionOp};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// Request-scoped diagnostic context for one session operation.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a span tagged with the operation and subject username.
	pub fn new(op: SessionOp, username: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"session_gate.op",
				op = op.as_str(),
				username,
				outcome = tracing::field::Empty,
				error = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (op, username);

			Self {}
		}
	}

	/// Attaches the outcome of `result` to the span and emits a completion event.
	pub fn record<T>(&self, result: &Result<T>) {
		#[cfg(feature = "tracing")]
		{
			let outcome = OpOutcome::of(result);

			self.span.record("outcome", outcome.as_str());

			match result {
				Ok(_) => tracing::info!(parent: &self.span, outcome = outcome.as_str(), "completed"),
				Err(e) => {
					self.span.record("error", e.kind());
					tracing::warn!(
						parent: &self.span,
						outcome = outcome.as_str(),
						error = e.kind(),
						"failed: {e}"
					);
				},
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = result;
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_accepts_both_outcomes() {
		let span = OpSpan::new(SessionOp::Login, "bob");

		span.record(&Ok::<_, Error>(()));
		span.record(&Err::<(), _>(Error::BadAuth));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OpSpan::new(SessionOp::Validate, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
