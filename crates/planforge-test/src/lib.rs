//! Shared test fixtures for PlanForge crates.
//!
//! Each module builds one small planning domain with a known answer:
//!
//! - [`errand`] - three-step errand with one unreachable goal
//! - [`lights`] - switchable lights; every action can be undone
//! - [`chain`] - a line of `n` steps with back edges
//! - [`switches`] - independent switches, so the first layer is wide
//! - [`route`] - weighted routes where the cheapest plan is not the shortest
//! - [`tyre`] - boot, tools and wheel nut, grounded from action and constraint schemas
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! planforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use planforge_test::errand;
//!
//! let problem = errand::problem();
//! assert_eq!(problem.actions().len(), 3);
//! ```

pub mod chain;
pub mod errand;
pub mod lights;
pub mod route;
pub mod switches;
pub mod tyre;
