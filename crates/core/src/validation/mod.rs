//! Multi-field form validation engine.
//!
//! Provides the error taxonomy and priority table, cluster definitions, a
//! pure-logic evaluator, the aggregator/highlighter pair that decides what a
//! form shows, and the view-model adapter for the templates. All without
//! HTTP or storage dependencies.

pub mod aggregator;
pub mod change;
pub mod cluster;
pub mod clusters;
pub mod engine;
pub mod evaluator;
pub mod highlight;
pub mod messages;
pub mod priority;
pub mod registry;
pub mod render;
pub mod rules;
