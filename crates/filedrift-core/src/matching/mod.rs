mod compare;
mod index;

pub use compare::{
    compare, duplicate_group_count, Comparison, Confidence, MatchKind, MatchStatus, TargetMatch,
};
pub use index::TargetIndex;
