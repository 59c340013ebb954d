use serde::Serialize;

/// Out-of-band advisory events broadcast by the gateway.
///
/// Notices carry context a caller cannot recover from the error alone;
/// subscribers typically surface them as a banner or prompt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// The remote API could not be reached or answered with an error
    /// status. Switching to demo mode is the suggested way out.
    ApiUnreachable { base_url: String, detail: String },
}
