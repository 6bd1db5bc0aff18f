//! In-memory record keeping and CSV export.
//!
//! The mission log and the authorization register are append-only lists.
//! They live in the API state and are exported as CSV on request.

mod authorization_register;
mod export;
mod mission_log;

pub use authorization_register::AuthorizationRegister;
pub use export::{
    AUTHORIZATION_COLUMNS, MISSION_COLUMNS, authorizations_to_csv, missions_to_csv,
    write_authorizations_csv, write_missions_csv,
};
pub use mission_log::MissionLog;
