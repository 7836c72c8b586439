//! Metrics of the fulfillment pipeline.

use crate::fulfillment::Stage;

/// Container for the filler's metric names.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Counter of `MessagePosted` logs forwarded to the pipeline. Labels: `chain_id`.
    pub const LOGS_FORWARDED_TOTAL: &'static str = "filler_logs_forwarded_total";
    /// Counter of messages entering the pipeline.
    pub const MESSAGES_RECEIVED_TOTAL: &'static str = "filler_messages_received_total";
    /// Counter of rejected messages. Labels: `stage`.
    pub const MESSAGES_REJECTED_TOTAL: &'static str = "filler_messages_rejected_total";
    /// Counter of submitted fulfillments. Labels: `chain_id`.
    pub const FULFILLMENTS_SUBMITTED_TOTAL: &'static str = "filler_fulfillments_submitted_total";
    /// Histogram of the time from log receipt to submission.
    pub const FULFILLMENT_DURATION_SECONDS: &'static str = "filler_fulfillment_duration_seconds";

    /// Describes the metrics and zeroes the label sets known up front.
    pub fn init(chain_ids: impl IntoIterator<Item = u64>) {
        Self::describe();
        Self::zero(chain_ids);
    }

    fn describe() {
        metrics::describe_counter!(
            Self::LOGS_FORWARDED_TOTAL,
            metrics::Unit::Count,
            "Number of MessagePosted logs forwarded to the fulfillment pipeline"
        );
        metrics::describe_counter!(
            Self::MESSAGES_RECEIVED_TOTAL,
            metrics::Unit::Count,
            "Number of messages entering the fulfillment pipeline"
        );
        metrics::describe_counter!(
            Self::MESSAGES_REJECTED_TOTAL,
            metrics::Unit::Count,
            "Number of messages rejected by the fulfillment pipeline"
        );
        metrics::describe_counter!(
            Self::FULFILLMENTS_SUBMITTED_TOTAL,
            metrics::Unit::Count,
            "Number of fulfillment transactions submitted"
        );
        metrics::describe_histogram!(
            Self::FULFILLMENT_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Time from receiving a message to submitting its fulfillment"
        );
    }

    fn zero(chain_ids: impl IntoIterator<Item = u64>) {
        metrics::counter!(Self::MESSAGES_RECEIVED_TOTAL).increment(0);
        for stage in Stage::ALL {
            metrics::counter!(Self::MESSAGES_REJECTED_TOTAL, "stage" => stage.as_str()).increment(0);
        }
        for chain_id in chain_ids {
            metrics::counter!(Self::LOGS_FORWARDED_TOTAL, "chain_id" => chain_id.to_string())
                .increment(0);
            metrics::counter!(Self::FULFILLMENTS_SUBMITTED_TOTAL, "chain_id" => chain_id.to_string())
                .increment(0);
        }
    }
}
