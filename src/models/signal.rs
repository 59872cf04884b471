//! Request signals a lookup is keyed on

use std::collections::BTreeMap;

/// Request headers, header name to value
pub type Headers = BTreeMap<String, String>;

/// Header names that may carry the device user agent, in priority order.
///
/// CGI-style names (`HTTP_*`) are accepted alongside plain HTTP names.
const USER_AGENT_HEADERS: &[&str] = &[
    "HTTP_USER_AGENT",
    "User-Agent",
    "HTTP_X_DEVICE_USER_AGENT",
    "X-Device-User-Agent",
];

/// The identifying parts of an incoming HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSignal {
    user_agent: Option<String>,
    headers: Headers,
}

impl RequestSignal {
    /// Build a signal from optional parts; blank values count as absent.
    ///
    /// A non-blank user agent is kept exactly as given.
    pub fn new(user_agent: Option<&str>, headers: Option<&Headers>) -> Self {
        Self {
            user_agent: user_agent
                .filter(|ua| !ua.trim().is_empty())
                .map(str::to_string),
            headers: headers.cloned().unwrap_or_default(),
        }
    }

    pub fn from_user_agent(user_agent: &str) -> Self {
        Self::new(Some(user_agent), None)
    }

    pub fn from_headers(headers: Headers) -> Self {
        Self {
            user_agent: None,
            headers,
        }
    }

    /// Explicit user agent given by the caller
    pub fn explicit_user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// True when the lookup should be keyed on headers rather than a user agent
    pub fn keyed_on_headers(&self) -> bool {
        self.user_agent.is_none()
    }

    /// Explicit user agent, falling back to the first user-agent-bearing header
    pub fn user_agent(&self) -> Option<&str> {
        self.explicit_user_agent().or_else(|| self.header_user_agent())
    }

    /// True when there is nothing to key a lookup on
    pub fn is_empty(&self) -> bool {
        self.user_agent.is_none() && self.headers.values().all(|v| v.trim().is_empty())
    }

    fn header_user_agent(&self) -> Option<&str> {
        USER_AGENT_HEADERS.iter().find_map(|wanted| {
            self.headers
                .iter()
                .find(|(name, value)| name.eq_ignore_ascii_case(wanted) && !value.is_empty())
                .map(|(_, value)| value.as_str())
        })
    }
}
