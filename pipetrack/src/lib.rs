//! `Pipetrack`: client library for the interview pipeline tracker.
//!
//! Layers, leaf first: [`session`] holds the bearer token, [`api`] talks
//! HTTP, [`services`] map backend endpoints to typed calls, [`hooks`] keep
//! refetchable load/error state, and [`views`] carry presentation logic for
//! the command-line front end in [`cli`].

pub mod api;
pub mod cli;
pub mod config;
pub mod hooks;
pub mod services;
pub mod session;
pub mod views;
