mod encoder;
mod region;
mod submission;

pub use encoder::{encode, encode_submission, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use region::Region;
pub use submission::{Submission, SubmissionForm};
