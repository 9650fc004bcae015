//! integrated tests

mod monitor;
