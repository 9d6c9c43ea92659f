//! 拓扑构建

mod chain;

pub use chain::{Chain, ScenarioSpec, build_chain};
