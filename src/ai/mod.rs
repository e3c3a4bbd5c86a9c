pub mod heuristic;

pub use heuristic::HeuristicAgent;
