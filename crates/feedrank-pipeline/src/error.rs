use thiserror::Error;

/// A problem found in one raw record and recovered with a default.
///
/// These never abort a batch; the normalizer logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIssue {
    #[error("no timestamp field present; using batch time")]
    MissingTimestamp,

    #[error("unparsable timestamp {value}; using batch time")]
    UnparsableTimestamp { value: String },

    #[error("no host could be extracted from url \"{url}\"; domain set to unknown")]
    UnparsableUrl { url: String },
}
