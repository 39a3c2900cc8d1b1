/// Read-through caching around a fallible async block.
///
/// Returns the cached value when present. Otherwise awaits `$block`, queues
/// the result for a background cache write with the given TTL (seconds) and
/// returns it. Cache read failures are logged and treated as misses so that
/// an unavailable Redis never takes the catalog down with it.
///
/// # Example
/// ```rust,no_run
/// use reelmatch_api::{cached, db::{Cache, CacheKey}, error::{AppError, AppResult}, models::Genre};
///
/// async fn genres(cache: &Cache) -> AppResult<Vec<Genre>> {
///     cached!(cache, CacheKey::Genres, 3600, async move {
///         Ok::<_, AppError>(vec![Genre { id: 80, name: "Crime".to_string() }])
///     })
/// }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => {
                tracing::debug!(key = %key, "Cache hit");
                Ok(cached)
            }
            miss => {
                if let Err(e) = miss {
                    tracing::warn!(key = %key, error = %e, "Cache read failed, fetching from catalog");
                }
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
