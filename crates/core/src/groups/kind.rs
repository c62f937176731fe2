//! Per-kind configuration for static group uploads.
//!
//! Computer groups and mobile device groups follow the same upload protocol;
//! they differ only in endpoints, the membership field and log/summary text.

/// Static description of one kind of static group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectKindConfig {
    /// Classic API object type used for membership reads
    pub object_type: &'static str,
    /// Jamf Pro API object type used for lookup and writes
    pub static_object_type: &'static str,
    /// Field holding the member records inside the classic object
    pub membership_field_path: &'static str,
    /// Human readable name used in logs and errors
    pub display_name: &'static str,
    /// Key under which a batch report stores this kind's summary
    pub summary_key: &'static str,
    pub summary_text: &'static str,
}

pub const COMPUTER_GROUP: ObjectKindConfig = ObjectKindConfig {
    object_type: "computer_group",
    static_object_type: "static_computer_group",
    membership_field_path: "computers",
    display_name: "Computer Group",
    summary_key: "jamfcomputerstaticgroupuploader_summary_result",
    summary_text: "The following computer groups were created or updated in Jamf Pro:",
};

pub const MOBILE_DEVICE_GROUP: ObjectKindConfig = ObjectKindConfig {
    object_type: "mobile_device_group",
    static_object_type: "static_mobile_device_group",
    membership_field_path: "mobile_devices",
    display_name: "Mobile Device Group",
    summary_key: "jamfmobiledevicestaticgroupuploader_summary_result",
    summary_text: "The following mobile device groups were created or updated in Jamf Pro:",
};

/// Selector for the supported group kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Computer,
    MobileDevice,
}

impl GroupKind {
    pub fn config(self) -> ObjectKindConfig {
        match self {
            GroupKind::Computer => COMPUTER_GROUP,
            GroupKind::MobileDevice => MOBILE_DEVICE_GROUP,
        }
    }
}

/// Relative API path for an object type, without leading or trailing slash.
///
/// Static group types live on the Jamf Pro API; their parent group types are
/// read through the Classic API, where the object id is appended after `/id/`.
pub fn api_endpoint(object_type: &str) -> Option<&'static str> {
    match object_type {
        "static_computer_group" => Some("api/v2/computer-groups/static-groups"),
        "static_mobile_device_group" => Some("api/v1/mobile-device-groups/static-groups"),
        "computer_group" => Some("JSSResource/computergroups"),
        "mobile_device_group" => Some("JSSResource/mobiledevicegroups"),
        _ => None,
    }
}

/// Whether an object type is served by the Classic API.
pub fn is_classic_object_type(object_type: &str) -> bool {
    api_endpoint(object_type).is_some_and(|path| path.starts_with("JSSResource/"))
}
