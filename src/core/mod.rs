//! Core business logic layer
//!
//! Framework-agnostic portal operations. Each store module works on a
//! [`model::PortalState`]; [`portal::Portal`] applies those operations and
//! persists the result.

/// Account sign-up, login, passwords, roles and profiles
pub mod accounts;
/// Teacher-subject assignments and ownership
pub mod assignments;
/// Admin overview, gradebooks and report cards
pub mod dashboard;
/// Enrollments, grade records and integrity checks
pub mod enrollment;
/// CSV exports
pub mod export;
/// Grade equivalence and pass/fail policy
pub mod grading;
/// Teacher name matching
pub mod identity;
/// Portal data model
pub mod model;
/// Persisted portal wrapper
pub mod portal;
/// Default accounts and sample data
pub mod seed;
/// Student records
pub mod students;
/// Subject catalog
pub mod subjects;
/// Key-value blob persistence
pub mod storage;
