mod combiner;
mod majority_vote;
mod weighted_vote;

pub use combiner::Combiner;
pub use combiner::CombinerRef;
pub use majority_vote::MajorityVote;
pub use weighted_vote::WeightedVote;
