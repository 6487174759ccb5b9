//! Symbolic names in the onboarding (`hpsa.json`) table.

pub const LETS_START: &str = "let's get start";
pub const LAUNCH_SUPPORT_ASSISTANT: &str = "Launch HP Support Assistant";
pub const SELECT_REGION: &str = "Select region";
pub const DROP_MENU: &str = "drop region menu";
/// Region option picked from the drop menu.
pub const SELECT_REGION_US: &str = "selectregion";
pub const CONTINUE: &str = "Continue";
pub const DONT_SHOW_AGAIN: &str = "Don't show again";
pub const CONTINUE_AS_GUEST: &str = "Continue as Guest";
pub const WARRANTY_OPTION: &str = "warranty option";
pub const USAGE_DATA: &str = "usage data";
pub const IMPROVE_MY_EXPERIENCE: &str = "improve my experience";
pub const CREATE_ACCOUNT: &str = "CreateAccount";
/// "Details" link on the data sharing popup.
pub const DETAILS: &str = "Details";
pub const LETS_SHARE_LATER: &str = "LetsShareLater";
pub const CLOSE_PIN_POPUP: &str = "Close pin popup";

// Looked up in the onboarding table although they live on the dashboard.
pub const SPECIFICATIONS: &str = "Specifications";
pub const SPECIFICATIONS_LIST: &str = "SpecificationsList";
pub const SPECIFICATIONS_CLOSE: &str = "SpecificationsClose";
pub const NETWORK: &str = "Network";
pub const CREATE_ACCOUNT_OR_SIGN_IN: &str = "createAccountOrSignIn";
pub const USERNAME: &str = "Username";
pub const PROFILE: &str = "Profile";
pub const SIGN_OUT: &str = "Sign out";
pub const SIGN_OUT_CONFIRM: &str = "Yes in Sign out popup";
pub const LOGGED_IN: &str = "LoggedIn";
