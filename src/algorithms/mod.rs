pub mod a_star;
pub mod common;
pub mod dfs;
pub mod dijkstra;

pub use a_star::AStar;
pub use common::{Budget, SearchOutcome, SearchStrategy};
pub use dfs::DepthFirst;
pub use dijkstra::Dijkstra;
