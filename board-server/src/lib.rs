//! Station departure and arrival boards.
//!
//! A web application that answers: "which trains leave or reach this
//! station soon, and are they on time?"

pub mod board;
pub mod config;
pub mod domain;
pub mod feed;
pub mod web;
