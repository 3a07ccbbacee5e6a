//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`configure`]: Prompt for API credentials and save them
//! - [`export_report`]: Export a report's resources to a CSV file
//!
//! Output formatting utilities are in [`output`].

pub mod configure;
pub mod export_report;
pub mod output;
