//! Coinshell CLI Library
//!
//! This crate provides the terminal front end for coinshell, an interactive
//! terminal for exploring crypto data. It wires the dispatch engine from
//! `coinshell-core` to stdin/stdout: prompt reading, table and figure
//! rendering, fuzzy command suggestions, and the built-in menu tree.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and session configuration
//! - [`prompt`]: The interactive stdin input source and "did you mean" hints
//! - [`render`]: Column-aligned table output and unicode bar figures
//! - [`data`]: Built-in sample datasets the shipped handlers draw from
//! - [`menus`]: The menu tree (`/`, `/crypto/`, `/crypto/defi/`,
//!   `/crypto/onchain/`)
//!
//! # Examples
//!
//! The `coinshell` binary can be used in several ways:
//!
//! ```bash
//! # Interactive session starting at the root menu
//! coinshell
//!
//! # Run a batch of commands, then drop into the prompt
//! coinshell /crypto/defi/ "tvl -l 5"
//!
//! # Run a routine file and exit
//! coinshell --routine morning.yml quit
//!
//! # Abort on unknown flags instead of warning
//! coinshell --strict
//! ```

pub mod cli_args;
pub mod data;
pub mod menus;
pub mod prompt;
pub mod render;
