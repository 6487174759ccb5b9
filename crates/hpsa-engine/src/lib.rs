pub mod actions;
pub mod config;
pub mod device;
pub mod driver;
pub mod flows;
pub mod poll;
pub mod scenario;
pub mod screenshot;

pub use actions::{FailurePolicy, FlowError, Table, UiContext};
pub use driver::{DriverError, NavigationResult, UiDriver};
pub use poll::{PollError, PollOptions, PollOutcome, poll, poll_while};
pub use scenario::{Scenario, ScenarioError, ScenarioReport, ScenarioRunner};
