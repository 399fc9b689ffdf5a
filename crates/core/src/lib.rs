//! Domain logic for the database setup gate: credentials, connectivity
//! probing, host failover, script execution, and the completion marker.
//! No HTTP types live here.

pub mod credentials;
pub mod error;
pub mod scripting;
pub mod setup;
