//! Domain logic for the RnR second-hand apparel shop.
//!
//! Pure types and rules shared by the persistence and API layers:
//! the reservation status state machine and its product side-effect
//! table, customer input validation, and reservation deadline
//! arithmetic. No I/O lives here.

pub mod customer;
pub mod error;
pub mod reservation;
pub mod status;
pub mod types;
