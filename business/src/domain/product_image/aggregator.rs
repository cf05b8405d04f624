use std::collections::HashSet;
use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Duration;

use futures_util::{StreamExt, TryStreamExt, stream};

use super::errors::ProductImageError;
use super::model::{AggregatedProductImage, ImageIndexEntry, ProductImage};
use crate::domain::errors::CatalogError;
use crate::domain::shared::value_objects::ProductId;

/// How detail fetches are scheduled during an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// One fetch at a time, in first-seen order.
    #[default]
    Sequential,
    /// Up to `max_in_flight` fetches at once. Results are still emitted in
    /// first-seen order and the first failure in that order aborts the call.
    Concurrent { max_in_flight: NonZeroUsize },
}

impl FetchStrategy {
    /// `0` and `1` mean sequential.
    pub fn with_max_in_flight(max_in_flight: usize) -> Self {
        match NonZeroUsize::new(max_in_flight) {
            Some(limit) if limit.get() > 1 => FetchStrategy::Concurrent {
                max_in_flight: limit,
            },
            _ => FetchStrategy::Sequential,
        }
    }
}

/// Resolves an image index listing into one image payload per distinct product.
///
/// The aggregator holds no state between calls. Each call:
/// - rejects the listing if any entry has no usable product id (no fetch is issued),
/// - calls `fetch_detail` exactly once per distinct product id, in first-seen order,
/// - fails as a whole on the first fetch failure or timeout; no partial result is returned.
#[derive(Debug, Clone, Default)]
pub struct ImageAggregator {
    strategy: FetchStrategy,
    fetch_timeout: Option<Duration>,
}

impl ImageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    /// Distinct product ids of the listing, in first-seen order.
    pub fn distinct_product_ids(
        entries: &[ImageIndexEntry],
    ) -> Result<Vec<ProductId>, ProductImageError> {
        let mut seen = HashSet::new();
        let mut product_ids = Vec::new();

        for (position, entry) in entries.iter().enumerate() {
            let product_id = entry
                .product_id
                .as_ref()
                .ok_or(ProductImageError::MalformedEntry { position })?;

            if seen.insert(product_id) {
                product_ids.push(product_id.clone());
            }
        }

        Ok(product_ids)
    }

    pub async fn aggregate<F, Fut>(
        &self,
        entries: &[ImageIndexEntry],
        mut fetch_detail: F,
    ) -> Result<Vec<AggregatedProductImage>, ProductImageError>
    where
        F: FnMut(ProductId) -> Fut,
        Fut: Future<Output = Result<ProductImage, CatalogError>>,
    {
        let product_ids = Self::distinct_product_ids(entries)?;

        match self.strategy {
            FetchStrategy::Sequential => {
                let mut aggregated = Vec::with_capacity(product_ids.len());
                for product_id in product_ids {
                    let pending = fetch_detail(product_id.clone());
                    aggregated.push(self.resolve(product_id, pending).await?);
                }
                Ok(aggregated)
            }
            FetchStrategy::Concurrent { max_in_flight } => {
                stream::iter(product_ids)
                    .map(|product_id| {
                        let pending = fetch_detail(product_id.clone());
                        self.resolve(product_id, pending)
                    })
                    .buffered(max_in_flight.get())
                    .try_collect()
                    .await
            }
        }
    }

    async fn resolve<Fut>(
        &self,
        product_id: ProductId,
        pending: Fut,
    ) -> Result<AggregatedProductImage, ProductImageError>
    where
        Fut: Future<Output = Result<ProductImage, CatalogError>>,
    {
        let outcome = match self.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(outcome) => outcome,
                Err(_) => return Err(ProductImageError::FetchTimeout { product_id }),
            },
            None => pending.await,
        };

        match outcome {
            Ok(images) => Ok(AggregatedProductImage { product_id, images }),
            Err(cause) => Err(ProductImageError::FetchFailed { product_id, cause }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    fn entries(ids: &[&str]) -> Vec<ImageIndexEntry> {
        ids.iter().map(|raw| ImageIndexEntry::new(id(raw))).collect()
    }

    fn png(bytes: &str) -> ProductImage {
        ProductImage {
            content_type: "image/png".to_string(),
            image_bytes: bytes.to_string(),
        }
    }

    fn served(bytes: &str) -> Result<ProductImage, CatalogError> {
        Ok(png(bytes))
    }

    fn output_ids(result: &[AggregatedProductImage]) -> Vec<String> {
        result.iter().map(|a| a.product_id.to_string()).collect()
    }

    #[tokio::test]
    async fn should_collapse_duplicates_in_first_seen_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = calls.clone();

        let result = ImageAggregator::new()
            .aggregate(&entries(&["A", "B", "A", "C", "B"]), move |product_id| {
                recorder.lock().unwrap().push(product_id.to_string());
                async move { served(&format!("img-{}", product_id)) }
            })
            .await
            .unwrap();

        assert_eq!(output_ids(&result), vec!["A", "B", "C"]);
        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "C"]);
        assert_eq!(result[2].images.image_bytes, "img-C");
    }

    #[tokio::test]
    async fn should_return_exact_payloads_when_listing_has_duplicates() {
        let result = ImageAggregator::new()
            .aggregate(&entries(&["p1", "p1", "p2"]), |product_id| async move {
                match product_id.as_str() {
                    "p1" => served("AAA"),
                    _ => served("BBB"),
                }
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            vec![
                AggregatedProductImage {
                    product_id: id("p1"),
                    images: png("AAA"),
                },
                AggregatedProductImage {
                    product_id: id("p2"),
                    images: png("BBB"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn should_return_empty_result_without_fetching_when_listing_is_empty() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();

        let result = ImageAggregator::new()
            .aggregate(&[], move |_| {
                *counter.lock().unwrap() += 1;
                async { served("AAA") }
            })
            .await
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn should_fail_fast_when_second_fetch_fails() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = calls.clone();

        let result = ImageAggregator::new()
            .aggregate(&entries(&["p1", "p2", "p1", "p3"]), move |product_id| {
                recorder.lock().unwrap().push(product_id.to_string());
                async move {
                    if product_id.as_str() == "p2" {
                        Err(CatalogError::UnexpectedStatus(500))
                    } else {
                        served("AAA")
                    }
                }
            })
            .await;

        match result {
            Err(ProductImageError::FetchFailed { product_id, cause }) => {
                assert_eq!(product_id, id("p2"));
                assert_eq!(cause, CatalogError::UnexpectedStatus(500));
            }
            other => panic!("expected fetch failure, got {:?}", other),
        }
        assert_eq!(*calls.lock().unwrap(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn should_reject_listing_with_malformed_entry_before_fetching() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        let mut listing = entries(&["p1", "p2"]);
        listing.push(ImageIndexEntry::malformed());

        let result = ImageAggregator::new()
            .aggregate(&listing, move |_| {
                *counter.lock().unwrap() += 1;
                async { served("AAA") }
            })
            .await;

        assert!(matches!(
            result,
            Err(ProductImageError::MalformedEntry { position: 2 })
        ));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn should_report_timeout_with_failing_product_id() {
        let result = ImageAggregator::new()
            .with_fetch_timeout(Duration::from_millis(20))
            .aggregate(&entries(&["fast", "slow"]), |product_id| async move {
                if product_id.as_str() == "slow" {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                served("AAA")
            })
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ProductImageError::FetchTimeout { .. }));
        assert_eq!(err.failing_product_id(), Some(&id("slow")));
    }

    #[tokio::test]
    async fn should_keep_first_seen_order_when_fetching_concurrently() {
        let aggregator =
            ImageAggregator::new().with_strategy(FetchStrategy::with_max_in_flight(3));

        let result = aggregator
            .aggregate(&entries(&["A", "B", "A", "C", "B"]), |product_id| async move {
                let delay = match product_id.as_str() {
                    "A" => 40,
                    "B" => 10,
                    _ => 1,
                };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                served(product_id.as_str())
            })
            .await
            .unwrap();

        assert_eq!(output_ids(&result), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn should_fail_whole_call_when_concurrent_fetch_fails() {
        let aggregator =
            ImageAggregator::new().with_strategy(FetchStrategy::with_max_in_flight(2));

        let result = aggregator
            .aggregate(&entries(&["p1", "p2", "p3"]), |product_id| async move {
                if product_id.as_str() == "p2" {
                    Err(CatalogError::Unreachable)
                } else {
                    served("AAA")
                }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.failing_product_id(), Some(&id("p2")));
    }

    #[tokio::test]
    async fn should_fetch_each_raw_id_when_ids_differ_only_by_whitespace_or_json_type() {
        let listing: Vec<ImageIndexEntry> = [json!(" p1"), json!("p1"), json!(17), json!("17")]
            .iter()
            .map(|raw| ImageIndexEntry::new(ProductId::from_json(raw).unwrap()))
            .collect();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = calls.clone();

        let result = ImageAggregator::new()
            .aggregate(&listing, move |product_id| {
                recorder.lock().unwrap().push(product_id.clone());
                async move { served(product_id.as_str()) }
            })
            .await
            .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                ProductId::Text(" p1".to_string()),
                ProductId::Text("p1".to_string()),
                ProductId::Number("17".to_string()),
                ProductId::Text("17".to_string()),
            ]
        );
    }

    #[test]
    fn should_treat_zero_and_one_in_flight_as_sequential() {
        assert_eq!(FetchStrategy::with_max_in_flight(0), FetchStrategy::Sequential);
        assert_eq!(FetchStrategy::with_max_in_flight(1), FetchStrategy::Sequential);
        assert!(matches!(
            FetchStrategy::with_max_in_flight(4),
            FetchStrategy::Concurrent { .. }
        ));
    }

    proptest! {
        #[test]
        fn should_fetch_once_per_distinct_id(raw in prop::collection::vec(0u8..6, 0..24)) {
            let listing: Vec<ImageIndexEntry> = raw
                .iter()
                .map(|n| ImageIndexEntry::new(id(&format!("p{}", n))))
                .collect();
            let distinct: HashSet<u8> = raw.iter().copied().collect();

            let runtime = tokio::runtime::Runtime::new().unwrap();
            let calls = Arc::new(Mutex::new(0usize));
            let counter = calls.clone();

            let result = runtime
                .block_on(ImageAggregator::new().aggregate(&listing, move |product_id| {
                    *counter.lock().unwrap() += 1;
                    async move { served(product_id.as_str()) }
                }))
                .unwrap();

            prop_assert_eq!(*calls.lock().unwrap(), distinct.len());
            prop_assert_eq!(result.len(), distinct.len());
        }

        #[test]
        fn should_be_idempotent_with_pure_fetch(raw in prop::collection::vec(0u8..8, 0..16)) {
            let listing: Vec<ImageIndexEntry> = raw
                .iter()
                .map(|n| ImageIndexEntry::new(id(&format!("p{}", n))))
                .collect();
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let aggregator = ImageAggregator::new();

            let first = runtime
                .block_on(aggregator.aggregate(&listing, |product_id| async move {
                    served(product_id.as_str())
                }))
                .unwrap();
            let second = runtime
                .block_on(aggregator.aggregate(&listing, |product_id| async move {
                    served(product_id.as_str())
                }))
                .unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
