//! User-Agent string shared by the page fetcher, size probe, and downloader.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/doclinks/doclinks";

/// Default User-Agent for every outbound request (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("doclinks/{version} (document-link-harvester; +{PROJECT_UA_URL})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_version_and_project_url() {
        let ua = default_user_agent();
        assert!(ua.contains(PROJECT_UA_URL), "UA must contain project URL: {ua}");
        assert_eq!(
            ua.strip_prefix("doclinks/").and_then(|s| s.split(' ').next()),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_user_agent_identifies_purpose() {
        assert!(default_user_agent().contains("document-link-harvester"));
    }
}
