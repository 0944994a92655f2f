pub mod component;
pub mod core;
pub mod dispatch;
pub mod queue;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the API version string from build script into u32
pub fn get_component_api_version() -> u32 {
    COMPONENT_API_VERSION.parse().unwrap_or(20260115)
}
