//! Core library for hijri
//!
//! This crate implements the **Functional Core** of the hijri service,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`hijri_core`** (this crate): request validation, calendar conversion and
//!   response shaping, with zero I/O
//! - **`hijri`**: the HTTP transport, CLI and logging (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: the same request body always produces the same
//!   `(status, body)` pair
//! - **No side effects**: no logging, no persistence, no shared state between calls
//! - **Testable**: every path can be exercised with plain byte slices
//!
//! # Module Organization
//!
//! - [`request`]: Decoding of the JSON body and the `dd/mm/yyyy` pattern check
//! - [`calendar`]: The [`calendar::CalendarConverter`] capability and the Umm al-Qura adapter
//! - [`response`]: Response shapes and their pretty JSON rendering
//! - [`handler`]: The error taxonomy and the request-to-reply computation
//!
//! # Example Usage
//!
//! ```rust
//! use hijri_core::calendar::UmmAlQuraConverter;
//! use hijri_core::handler::handle_body;
//!
//! let converter = UmmAlQuraConverter::default();
//! let reply = handle_body(br#"{"date": "27/07/2025"}"#, &converter);
//!
//! assert_eq!(reply.status, 200);
//! assert!(reply.body.is_success());
//! ```

pub mod calendar;
pub mod handler;
pub mod request;
pub mod response;
