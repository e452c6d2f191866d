//! String distance functions: the metric catalog and the match-rating comparator.

pub mod distance;
pub mod match_rating;
