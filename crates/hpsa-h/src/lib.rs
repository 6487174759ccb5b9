pub mod cdp;
pub mod driver;
pub mod locator;

pub use driver::HeadlessDriver;
