pub mod run;
pub mod state;

pub use state::{Action, App, ResultPanel};
