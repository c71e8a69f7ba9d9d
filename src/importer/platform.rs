use crate::models::Platform;
use url::Url;

/// Detect the listing platform of an already-validated URL.
///
/// The host is checked first; URLs without a host (e.g. `mailto:`) fall
/// back to a plain substring test over the whole URL.
pub fn classify(url: &Url) -> Option<Platform> {
    let haystack = match url.host_str() {
        Some(host) => host.to_lowercase(),
        None => url.as_str().to_lowercase(),
    };

    Platform::ALL
        .into_iter()
        .find(|platform| haystack.contains(platform.identifier()))
}

/// Comma separated canonical names, for failure messages
pub fn supported_names(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(Platform::name)
        .collect::<Vec<_>>()
        .join(", ")
}
