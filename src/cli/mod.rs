//! CLI infrastructure for the `ttt-td` binary
//!
//! Training and terminal play share the learning-parameter options in
//! [`config`] and the print helpers in [`output`].

pub mod commands;
pub mod config;
pub mod output;
