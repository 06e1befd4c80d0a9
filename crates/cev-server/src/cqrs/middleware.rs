//! Marker traits distinguishing write commands from read queries
//!
//! Commands mutate state and run via POST/PUT/DELETE; queries read state
//! and run via GET. The markers document intent at each request type's
//! definition site.

/// A write operation
pub trait Command {}

/// A read operation
pub trait Query {}
