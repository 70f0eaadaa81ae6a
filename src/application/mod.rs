pub mod ask;
pub mod build_index;
pub mod compose;
pub mod intent_filter;
pub mod rank;
pub mod retrieve;
