//! Bus seat booking server.
//!
//! Answers: "which seats on which buses are free between these two
//! stations?" A seat is shared by every passenger whose boarding-to-alighting
//! spans do not overlap, so availability is decided per route segment rather
//! than per trip.

pub mod availability;
pub mod booking;
pub mod config;
pub mod directory;
pub mod domain;
pub mod web;
