//! sea-orm entities for the Aurum web service.

pub mod accounts;
