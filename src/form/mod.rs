pub mod controller;
pub mod store;

pub use controller::{FormController, FormStatus, SubmitOutcome};
