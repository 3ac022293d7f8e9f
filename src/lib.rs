//! Attendance and Overtime Engine
//!
//! This crate provides the core logic of an employee attendance platform:
//! evaluating geolocated check-in/check-out events against a work schedule
//! and holiday calendar, and driving the approval workflows that attendance
//! corrections and overtime requests pass through.
//!
//! The crate performs no I/O. Every operation is a synchronous computation
//! over values supplied by the caller; persistence, transport, and
//! authorization live outside this crate.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod workflow;
