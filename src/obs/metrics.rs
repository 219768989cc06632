// self
use crate::obs::{OpOutcome, SessionOp};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(op: SessionOp, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"session_gate_op_total",
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

/// Records a call rejected by the admission layer (when enabled).
pub fn record_rate_limited(op: SessionOp) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("session_gate_rate_limited_total", "op" => op.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = op;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_op_outcome_noop_without_recorder() {
		record_op_outcome(SessionOp::Signup, OpOutcome::Failure);
		record_rate_limited(SessionOp::Signup);
	}
}
