//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep error
//! handling consistent across the crate.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Missing records
    // ---------------------------
    #[error("Time entry not found: {0}")]
    EntryNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(i64),

    #[error("Project {0} does not exist in this organization")]
    ProjectNotFound(i64),

    #[error("Location {0} does not exist in this organization")]
    LocationNotFound(i64),

    #[error("No time entries found for project {0} in the given range")]
    NoProjectEntries(i64),

    // ---------------------------
    // Lifecycle state errors
    // ---------------------------
    #[error("Time entry {0} is already clocked out")]
    AlreadyClockedOut(i64),

    #[error("User {0} already has an open time entry")]
    AlreadyClockedIn(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Clock-out cannot be earlier than clock-in")]
    NegativeDuration,

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid duration literal: {0}")]
    InvalidDuration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
