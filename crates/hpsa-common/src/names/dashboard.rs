//! Symbolic names in the dashboard (`dashboard.json`) table.

pub const WARRANTY_CARD: &str = "WarrantyCard";
pub const WARRANTY_BACK: &str = "WarrantyBack";
pub const ADDITIONAL_INFORMATION: &str = "AdditionalInformation";
/// Warranty card shown when no data sharing option was selected.
pub const WARRANTY_CARD_GET_DETAIL: &str = "WarrantyCardGetDetail";
pub const WARRANTY_CARD_GET_DETAIL_YES: &str = "WarrantyCardGetDetailYES";

pub const BATTERY_CHECK: &str = "BatteryCheck";
pub const BATTERY_CHECK_BACK: &str = "BatteryCheckBack";
/// Run button shared by the battery and CPU checks.
pub const RUN_BATTERY_CHECK: &str = "RunBatteryCheck";
pub const RUN_BATTERY_CHECK_DISABLED: &str = "RunBatteryCheckDisabled";
pub const CHECK_CPU: &str = "CheckCPU";
pub const CHECK_CPU_BACK: &str = "CheckCPUBack";
pub const CPU_CHECK_PASS_IMAGE: &str = "CPUCheckPassImage";
pub const CHECK_SYSTEM_MEMORY: &str = "CheckSystemMemory";
pub const CHECK_SYSTEM_MEMORY_BACK: &str = "CheckSystemMemoryBack";
pub const CHECK_CONNECTIVITY: &str = "CheckConnectivity";
pub const CHECK_CONNECTIVITY_BACK: &str = "CheckConnectivityBack";
pub const COMPONENT_TEST: &str = "ComponentTest";
pub const COMPONENT_TEST_BACK: &str = "ComponentTestBack";
pub const CHECK_STORAGE: &str = "CheckStorage";
pub const CHECK_STORAGE_BACK: &str = "CheckStorageBack";

pub const SETTINGS: &str = "Settings";
pub const ABOUT_HPSA: &str = "AboutHPSA";
pub const SEE_ALL: &str = "SeeAll";

pub const FEEDBACK: &str = "Feedback";
pub const ONE_STAR: &str = "OneStar";
pub const TWO_STARS: &str = "TwoStars";
pub const THREE_STARS: &str = "ThreeStars";
pub const FOUR_STARS: &str = "FourStars";
pub const FIVE_STARS: &str = "FiveStars";
pub const FEEDBACK_TEXTBOX_UNSELECT: &str = "FeedbackTextboxunselect";
pub const FEEDBACK_LINK: &str = "FeedbackLink";
pub const FEEDBACK_CANCEL: &str = "FeedbackCancel";

pub const DEVICE_NAME: &str = "DeviceName";
pub const SERIAL_NUMBER: &str = "SerialNumber";
pub const PRODUCT_NUMBER: &str = "ProductNumber";

/// Button of the popup the app shows on an unhandled exception.
pub const EXCEPTION_BTN: &str = "ExceptionBtn";

pub const VIRTUAL_AGENT: &str = "VirtualAgent";
pub const VIRTUAL_AGENT_DOWN: &str = "VirtualAgentDown";
pub const VIRTUAL_AGENT_UP: &str = "VirtualAgentUp";
pub const VIRTUAL_AGENT_CLOSE: &str = "VirtualAgentClose";

/// Feedback star ratings in ascending order.
pub const FEEDBACK_STARS: [&str; 5] = [ONE_STAR, TWO_STARS, THREE_STARS, FOUR_STARS, FIVE_STARS];
