pub mod extract;
pub mod fetch;
pub mod platform;

pub use fetch::{PageFetcher, ProxyFetcher, StaticFetcher};

use crate::config::AssistantConfig;
use crate::error::ImportError;
use crate::latency::Latency;
use crate::models::{ImportOutcome, Platform, Property};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// Platforms with a page extractor
pub const EXTRACTABLE: [Platform; 2] = [Platform::Booking, Platform::Airbnb];

/// Turns listing URLs into `Property` records.
///
/// Every public entry point returns an `ImportOutcome`; no error escapes.
/// Calls share no state, so concurrent imports are independent.
#[derive(Clone)]
pub struct PropertyImporter {
    fetcher: Arc<dyn PageFetcher>,
    latency: Latency,
}

impl PropertyImporter {
    pub fn new(fetcher: Arc<dyn PageFetcher>, latency: Latency) -> Self {
        Self { fetcher, latency }
    }

    /// Importer that fetches through the configured proxy
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let fetcher = ProxyFetcher::new(
            config.importer.proxy_url.clone(),
            Duration::from_secs(config.importer.fetch_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(fetcher), config.import_latency()))
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Canned import: validate and classify, then return the demo record
    /// for any known platform.
    pub async fn simulate_import(&self, url: &str) -> ImportOutcome {
        info!("Simulating import of {}", url);
        let result = async {
            let platform = validate_and_classify(url, &Platform::ALL)?;
            self.latency.wait().await;
            Ok::<_, ImportError>(extract::demo_property(platform, url))
        }
        .await;
        finish(url, result)
    }

    /// Fetch the listing page and extract a record from it.
    pub async fn import_property(&self, url: &str) -> ImportOutcome {
        info!("Importing {}", url);
        let result = self.fetch_and_extract(url).await;
        finish(url, result)
    }

    /// Like `import_property`, but gives up once `cancel` fires.
    pub async fn import_property_cancellable(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ImportOutcome {
        info!("Importing {} (cancellable)", url);
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ImportError::Cancelled),
            result = self.fetch_and_extract(url) => result,
        };
        finish(url, result)
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<Property, ImportError> {
        let platform = validate_and_classify(url, &EXTRACTABLE)?;

        self.latency.wait().await;

        debug!("Fetching page via {} fetcher", self.fetcher.source_name());
        let html = self.fetcher.fetch(url).await.map_err(|e| {
            warn!("Fetch failed for {}: {:#}", url, e);
            ImportError::Fetch(e.to_string())
        })?;

        debug!("Extracting {} listing from {} bytes", platform, html.len());
        let property = match platform {
            Platform::Booking => extract::booking_property(&html, url),
            Platform::Airbnb => extract::airbnb_property(url),
            Platform::Vrbo | Platform::Expedia => {
                return Err(ImportError::UnsupportedPlatform {
                    supported: platform::supported_names(&EXTRACTABLE),
                });
            }
        };
        Ok(property)
    }
}

/// Check the URL is absolute and belongs to one of `allowed`.
fn validate_and_classify(url: &str, allowed: &[Platform]) -> Result<Platform, ImportError> {
    if url.trim().is_empty() {
        return Err(ImportError::InvalidUrl);
    }
    let parsed = Url::parse(url).map_err(|e| {
        debug!("Rejecting {:?}: {}", url, e);
        ImportError::InvalidUrl
    })?;

    let unsupported = || ImportError::UnsupportedPlatform {
        supported: platform::supported_names(allowed),
    };
    let platform = platform::classify(&parsed).ok_or_else(unsupported)?;
    if !allowed.contains(&platform) {
        return Err(unsupported());
    }

    debug!("Classified {} as {}", url, platform);
    Ok(platform)
}

fn finish(url: &str, result: Result<Property, ImportError>) -> ImportOutcome {
    match result {
        Ok(property) => {
            info!("✅ Imported \"{}\" from {}", property.name, property.platform);
            ImportOutcome::Success(property)
        }
        Err(e) => {
            warn!("Import of {} failed: {}", url, e);
            ImportOutcome::Failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;

    const BOOKING_URL: &str = "https://www.booking.com/x";

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            bail!("proxy returned 502 Bad Gateway")
        }

        fn source_name(&self) -> &'static str {
            "failing"
        }
    }

    struct StalledFetcher;

    #[async_trait]
    impl PageFetcher for StalledFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(std::future::pending::<String>().await)
        }

        fn source_name(&self) -> &'static str {
            "stalled"
        }
    }

    fn importer_with(fetcher: impl PageFetcher + 'static) -> PropertyImporter {
        PropertyImporter::new(Arc::new(fetcher), Latency::None)
    }

    fn booking_importer() -> PropertyImporter {
        importer_with(StaticFetcher::new().with_page(
            BOOKING_URL,
            r#"<h1>Casa Sol</h1><span data-testid="address">Calle Mayor 10</span>"#,
        ))
    }

    #[tokio::test]
    async fn test_simulate_rejects_non_url() {
        let outcome = booking_importer().simulate_import("not a url").await;
        assert_eq!(outcome, ImportOutcome::Failure("invalid URL".to_string()));
    }

    #[tokio::test]
    async fn test_blank_url_is_invalid() {
        let outcome = booking_importer().import_property("   ").await;
        assert_eq!(outcome.reason(), Some("invalid URL"));
    }

    #[tokio::test]
    async fn test_simulate_booking_success() {
        let outcome = booking_importer().simulate_import(BOOKING_URL).await;
        let property = outcome.property().unwrap();
        assert_eq!(property.platform.name(), "Booking.com");
        assert_eq!(property.original_url, BOOKING_URL);
    }

    #[tokio::test]
    async fn test_simulate_unknown_platform_names_supported_set() {
        let outcome = booking_importer()
            .simulate_import("https://example.com/listing")
            .await;
        let reason = outcome.reason().unwrap();
        assert!(reason.starts_with("unsupported platform"));
        for name in ["Booking.com", "Airbnb", "VRBO", "Expedia"] {
            assert!(reason.contains(name), "{}", reason);
        }
    }

    #[tokio::test]
    async fn test_simulate_accepts_every_known_platform() {
        let importer = booking_importer();
        for (url, platform) in [
            ("https://www.airbnb.com/rooms/1", Platform::Airbnb),
            ("https://www.vrbo.com/2", Platform::Vrbo),
            ("https://www.expedia.com/3", Platform::Expedia),
        ] {
            let outcome = importer.simulate_import(url).await;
            assert_eq!(outcome.property().unwrap().platform, platform);
        }
    }

    #[tokio::test]
    async fn test_import_extracts_booking_page() {
        let outcome = booking_importer().import_property(BOOKING_URL).await;
        let property = outcome.into_property().unwrap();
        assert_eq!(property.name, "Casa Sol");
        assert_eq!(property.address, "Calle Mayor 10");
        assert_eq!(property.description, extract::DEFAULT_DESCRIPTION);
        assert_eq!(property.original_url, BOOKING_URL);
    }

    #[tokio::test]
    async fn test_import_airbnb_uses_canned_record() {
        let url = "https://www.airbnb.com/rooms/42";
        let importer = importer_with(StaticFetcher::new().with_page(url, "<html></html>"));
        let property = importer.import_property(url).await.into_property().unwrap();
        assert_eq!(property.platform, Platform::Airbnb);
        assert_eq!(property.check_in_time, "16:00");
        assert_eq!(property.original_url, url);
    }

    #[tokio::test]
    async fn test_import_vrbo_has_no_extractor() {
        let outcome = booking_importer().import_property("https://www.vrbo.com/1").await;
        let reason = outcome.reason().unwrap();
        assert_eq!(
            reason,
            "unsupported platform: supported platforms are Booking.com, Airbnb"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_as_data() {
        let outcome = importer_with(FailingFetcher).import_property(BOOKING_URL).await;
        let reason = outcome.reason().unwrap();
        assert!(reason.starts_with("source unreachable"));
        assert!(reason.contains("502"));
    }

    #[tokio::test]
    async fn test_repeated_imports_match_except_timestamp() {
        let importer = booking_importer();
        let first = importer.import_property(BOOKING_URL).await.into_property().unwrap();
        let second = importer.import_property(BOOKING_URL).await.into_property().unwrap();
        assert!(first.same_listing(&second));

        let failure = importer.simulate_import("nope").await;
        assert_eq!(failure, importer.simulate_import("nope").await);
    }

    #[tokio::test]
    async fn test_list_fields_always_present() {
        let importer = booking_importer();
        for outcome in [
            importer.import_property(BOOKING_URL).await,
            importer.simulate_import("https://www.expedia.com/3").await,
        ] {
            let property = outcome.into_property().unwrap();
            let json = serde_json::to_value(&property).unwrap();
            for key in ["rules", "amenities", "images"] {
                assert!(json[key].is_array(), "{} missing", key);
            }
        }
    }

    #[tokio::test]
    async fn test_cancelled_import_fails() {
        let importer = importer_with(StalledFetcher);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = importer.import_property_cancellable(BOOKING_URL, &cancel).await;
        assert_eq!(outcome.reason(), Some("import cancelled"));
    }

    #[tokio::test]
    async fn test_cancelled_token_wins_over_ready_import() {
        let importer = booking_importer();
        let cancel = CancellationToken::new();
        cancel.cancel();
        for _ in 0..50 {
            let outcome = importer.import_property_cancellable(BOOKING_URL, &cancel).await;
            assert_eq!(outcome, ImportOutcome::Failure("import cancelled".to_string()));
        }
    }

    #[tokio::test]
    async fn test_uncancelled_token_lets_import_finish() {
        let outcome = booking_importer()
            .import_property_cancellable(BOOKING_URL, &CancellationToken::new())
            .await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_concurrent_imports_are_independent() {
        let importer = booking_importer();
        let (a, b) = tokio::join!(
            importer.import_property(BOOKING_URL),
            importer.simulate_import("https://example.com/listing"),
        );
        assert!(a.is_success());
        assert!(!b.is_success());
    }
}
