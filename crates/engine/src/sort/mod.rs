pub mod lifting_order;
pub mod lot;
pub mod winning_order;

pub use lifting_order::{lift_order, lifting_order, lifting_order_copy};
pub use lot::LotAssigner;
pub use winning_order::{Ranking, assign_category_ranks, classify, winning_order};
