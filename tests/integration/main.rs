//! Integration tests

mod config_test;
mod engine_test;
mod market_test;
mod momentum_test;
mod support;
