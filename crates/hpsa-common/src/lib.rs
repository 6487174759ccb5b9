pub mod error;
pub mod fixture;
pub mod result;
pub mod selector;

pub mod names {
    pub mod dashboard;
    pub mod welcome;
}

pub use error::{DriverError, FixtureError};
pub use fixture::{ElementTable, Fixtures, Profile, ProfileTable};
pub use result::ActionResult;
pub use selector::{ElementDescriptor, NameMatch, Role, Selector};
