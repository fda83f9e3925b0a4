//! End-to-end enrichment run: list → skip → resolve → batch → flush.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use logofill_records::{Record, RecordUpdate, TableClient, MAX_BATCH_UPDATE};
use logofill_resolve::ResolverChain;
use logofill_shared::{
    EnrichOptions, FieldsConfig, LogofillError, Result, RunId, SkipReason, SkipRule,
};

use crate::batch::UpdateBatcher;

/// Progress callback for reporting run status.
pub trait EnrichProgress: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a record's logo URL has been resolved.
    fn record_resolved(&self, company: &str, url: &str, current: usize, total: usize);
    /// Called when a record is skipped.
    fn record_skipped(&self, record_id: &str, reason: SkipReason);
    /// Called after a batch of updates has gone out.
    fn batch_flushed(&self, size: usize);
    /// Called when the writer pauses before the next batch.
    fn pacing(&self, pause: Duration);
    /// Called when the run completes.
    fn done(&self, report: &RunReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl EnrichProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_resolved(&self, _company: &str, _url: &str, _current: usize, _total: usize) {}
    fn record_skipped(&self, _record_id: &str, _reason: SkipReason) {}
    fn batch_flushed(&self, _size: usize) {}
    fn pacing(&self, _pause: Duration) {}
    fn done(&self, _report: &RunReport) {}
}

/// Outcome tallies for one enrichment run.
#[derive(Debug)]
pub struct RunReport {
    /// Run identifier, also attached to every log line of the run.
    pub run_id: RunId,
    /// Records considered, after the optional limit.
    pub scanned: usize,
    /// Updates written (or, on a dry run, that would have been written).
    pub updated: usize,
    /// Records skipped because a target field already holds a value.
    pub skipped_enriched: usize,
    /// Records skipped for lack of a company name.
    pub skipped_nameless: usize,
    /// Records skipped because no strategy produced a logo URL.
    pub skipped_unresolved: usize,
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl RunReport {
    /// Records skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.skipped_enriched + self.skipped_nameless + self.skipped_unresolved
    }
}

/// Run the full enrichment pass.
///
/// 1. List every record from the table
/// 2. Skip already-enriched and nameless records
/// 3. Resolve a logo URL through the strategy chain
/// 4. Queue updates and flush in fixed-size batches, pausing after each
///    full batch; the final partial batch goes out without a pause
///
/// A failed batch write aborts the run; everything still queued is lost.
#[instrument(skip_all, fields(batch_size = options.batch_size, dry_run = options.dry_run))]
pub async fn run_enrichment(
    options: &EnrichOptions,
    table: &TableClient,
    chain: &ResolverChain,
    progress: &dyn EnrichProgress,
) -> Result<RunReport> {
    if options.batch_size == 0 || options.batch_size > MAX_BATCH_UPDATE {
        return Err(LogofillError::validation(format!(
            "batch size must be between 1 and {MAX_BATCH_UPDATE}, got {}",
            options.batch_size
        )));
    }

    let start = Instant::now();
    let run_id = RunId::new();
    let pause = Duration::from_millis(options.pause_ms);

    info!(
        %run_id,
        table = table.table(),
        strategies = chain.len(),
        "starting enrichment run"
    );

    // --- Phase 1: List records ---
    progress.phase("Listing records");
    let mut records = table.list_all().await?;
    if let Some(limit) = options.limit {
        records.truncate(limit);
    }

    let total = records.len();
    info!(total, "records listed");

    let mut report = RunReport {
        run_id,
        scanned: total,
        updated: 0,
        skipped_enriched: 0,
        skipped_nameless: 0,
        skipped_unresolved: 0,
        dry_run: options.dry_run,
        elapsed: Duration::ZERO,
    };

    // --- Phase 2: Resolve and queue updates ---
    progress.phase("Resolving logos");
    let mut batcher = UpdateBatcher::new(options.batch_size);

    for (i, record) in records.iter().enumerate() {
        if already_enriched(record, &options.fields) {
            progress.record_skipped(&record.id, SkipReason::AlreadyEnriched);
            report.skipped_enriched += 1;
            debug!(record = %record.id, "already enriched, skipping");
            continue;
        }

        let Some(name) = record.field_str(&options.fields.name) else {
            progress.record_skipped(&record.id, SkipReason::MissingName);
            report.skipped_nameless += 1;
            debug!(record = %record.id, "no company name, skipping");
            continue;
        };

        let Some(url) = chain.resolve(name).await else {
            progress.record_skipped(&record.id, SkipReason::NoLogoFound);
            report.skipped_unresolved += 1;
            warn!(company = %name, record = %record.id, "no logo found, skipping");
            continue;
        };

        progress.record_resolved(name, &url, i + 1, total);

        if let Some(batch) = batcher.push(logo_update(record, &url, &options.fields)) {
            flush_batch(table, &batch, &mut report, progress).await?;

            // Crude fixed-rate throttle between full batches
            if !options.dry_run {
                progress.pacing(pause);
                debug!(pause_ms = options.pause_ms, "pacing before next batch");
                tokio::time::sleep(pause).await;
            }
        }
    }

    // --- Phase 3: Final flush ---
    let remaining = batcher.take_remaining();
    if !remaining.is_empty() {
        flush_batch(table, &remaining, &mut report, progress).await?;
    }

    report.elapsed = start.elapsed();
    progress.done(&report);

    info!(
        run_id = %report.run_id,
        updated = report.updated,
        skipped = report.skipped(),
        elapsed_ms = report.elapsed.as_millis(),
        "enrichment run complete"
    );

    Ok(report)
}

// ---------------------------------------------------------------------------
// Per-record helpers
// ---------------------------------------------------------------------------

/// Whether the record already carries a logo, under the configured rule.
/// Presence checks the field keys alone; truthy additionally treats null,
/// `""`, and `[]` as absent.
fn already_enriched(record: &Record, fields: &FieldsConfig) -> bool {
    match fields.skip_rule {
        SkipRule::Presence => {
            record.has_field(&fields.logo_url) || record.has_field(&fields.logo_file)
        }
        SkipRule::Truthy => {
            record.has_value(&fields.logo_url) || record.has_value(&fields.logo_file)
        }
    }
}

/// Build the update for one resolved record: the logo URL as text plus a
/// one-element attachment list referencing the same URL.
fn logo_update(record: &Record, url: &str, fields: &FieldsConfig) -> RecordUpdate {
    let mut updates = serde_json::Map::new();
    updates.insert(fields.logo_url.clone(), serde_json::json!(url));
    updates.insert(fields.logo_file.clone(), serde_json::json!([{ "url": url }]));

    RecordUpdate {
        id: record.id.clone(),
        fields: updates,
    }
}

async fn flush_batch(
    table: &TableClient,
    batch: &[RecordUpdate],
    report: &mut RunReport,
    progress: &dyn EnrichProgress,
) -> Result<()> {
    if report.dry_run {
        info!(size = batch.len(), "dry run, batch not written");
    } else {
        table.batch_update(batch).await?;
    }

    report.updated += batch.len();
    progress.batch_flushed(batch.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde_json::json;

    use logofill_resolve::{AliasResolver, BrandfetchResolver};

    // -----------------------------------------------------------------------
    // Test scaffolding
    // -----------------------------------------------------------------------

    /// Records every callback so tests can assert on flush and skip behavior.
    #[derive(Default)]
    struct RecordingProgress {
        flushes: Mutex<Vec<usize>>,
        pacing_events: AtomicUsize,
        skips: Mutex<Vec<(String, SkipReason)>>,
    }

    impl RecordingProgress {
        fn flushes(&self) -> Vec<usize> {
            self.flushes.lock().unwrap().clone()
        }

        fn pacing_events(&self) -> usize {
            self.pacing_events.load(Ordering::SeqCst)
        }

        fn skips(&self) -> Vec<(String, SkipReason)> {
            self.skips.lock().unwrap().clone()
        }
    }

    impl EnrichProgress for RecordingProgress {
        fn phase(&self, _name: &str) {}
        fn record_resolved(&self, _company: &str, _url: &str, _current: usize, _total: usize) {}

        fn record_skipped(&self, record_id: &str, reason: SkipReason) {
            self.skips.lock().unwrap().push((record_id.to_string(), reason));
        }

        fn batch_flushed(&self, size: usize) {
            self.flushes.lock().unwrap().push(size);
        }

        fn pacing(&self, _pause: Duration) {
            self.pacing_events.fetch_add(1, Ordering::SeqCst);
        }

        fn done(&self, _report: &RunReport) {}
    }

    fn test_options() -> EnrichOptions {
        EnrichOptions {
            fields: FieldsConfig::default(),
            batch_size: 10,
            pause_ms: 0,
            limit: None,
            dry_run: false,
        }
    }

    fn table_for(server: &wiremock::MockServer) -> TableClient {
        TableClient::new("at-token", "appTest", "Companies")
            .unwrap()
            .with_base_url(server.uri())
    }

    /// Chain holding only the built-in alias table.
    fn alias_chain() -> ResolverChain {
        ResolverChain::new(vec![Box::new(AliasResolver::new())])
    }

    /// Chain holding an alias table extended with the given pairs.
    fn alias_chain_with(pairs: &[(&str, &str)]) -> ResolverChain {
        let extra: BTreeMap<String, String> = pairs
            .iter()
            .map(|(name, domain)| (name.to_string(), domain.to_string()))
            .collect();
        ResolverChain::new(vec![Box::new(AliasResolver::with_extra(&extra))])
    }

    async fn mount_listing(server: &wiremock::MockServer, records: serde_json::Value) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/appTest/Companies"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(json!({ "records": records })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    fn patch_updates() -> wiremock::MockBuilder {
        wiremock::Mock::given(wiremock::matchers::method("PATCH"))
            .and(wiremock::matchers::path("/appTest/Companies"))
    }

    // -----------------------------------------------------------------------
    // Skip rules
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn enriched_records_are_left_untouched() {
        let server = wiremock::MockServer::start().await;
        mount_listing(
            &server,
            json!([
                {"id": "r1", "fields": {"Name": "Old Co", "Logo URL": "https://logo.clearbit.com/old.com"}},
                {"id": "r2", "fields": {"Name": "Other Co", "Logo File": [{"url": "https://logo.clearbit.com/other.com"}]}},
                {"id": "r3", "fields": {"Name": "dbt"}}
            ]),
        )
        .await;

        patch_updates()
            .and(wiremock::matchers::body_json(json!({
                "records": [{
                    "id": "r3",
                    "fields": {
                        "Logo URL": "https://logo.clearbit.com/dbtlabs.com",
                        "Logo File": [{"url": "https://logo.clearbit.com/dbtlabs.com"}]
                    }
                }]
            })))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&server)
            .await;

        let table = table_for(&server);
        let progress = RecordingProgress::default();
        let report = run_enrichment(&test_options(), &table, &alias_chain(), &progress)
            .await
            .unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.updated, 1);
        assert_eq!(report.skipped_enriched, 2);
        assert_eq!(
            progress.skips(),
            vec![
                ("r1".to_string(), SkipReason::AlreadyEnriched),
                ("r2".to_string(), SkipReason::AlreadyEnriched),
            ]
        );
    }

    #[tokio::test]
    async fn nameless_records_trigger_no_lookups() {
        let server = wiremock::MockServer::start().await;
        let brand_server = wiremock::MockServer::start().await;

        mount_listing(
            &server,
            json!([
                {"id": "r1", "fields": {"Notes": "no name here"}},
                {"id": "r2", "fields": {"Name": ""}}
            ]),
        )
        .await;

        let chain = ResolverChain::new(vec![Box::new(
            BrandfetchResolver::new("bf-key", "bf-client")
                .unwrap()
                .with_base_url(brand_server.uri()),
        )]);

        let table = table_for(&server);
        let report = run_enrichment(&test_options(), &table, &chain, &SilentProgress)
            .await
            .unwrap();

        assert_eq!(report.updated, 0);
        assert_eq!(report.skipped_nameless, 2);
        assert!(brand_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn presence_rule_skips_records_with_empty_values() {
        let server = wiremock::MockServer::start().await;
        mount_listing(
            &server,
            json!([{"id": "r1", "fields": {"Name": "dbt", "Logo URL": ""}}]),
        )
        .await;

        let table = table_for(&server);
        let report = run_enrichment(&test_options(), &table, &alias_chain(), &SilentProgress)
            .await
            .unwrap();

        assert_eq!(report.skipped_enriched, 1);
        assert_eq!(report.updated, 0);
    }

    #[tokio::test]
    async fn truthy_rule_reprocesses_records_with_empty_values() {
        let server = wiremock::MockServer::start().await;
        mount_listing(
            &server,
            json!([{"id": "r1", "fields": {"Name": "dbt", "Logo URL": ""}}]),
        )
        .await;

        patch_updates()
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&server)
            .await;

        let mut options = test_options();
        options.fields.skip_rule = SkipRule::Truthy;

        let table = table_for(&server);
        let report = run_enrichment(&options, &table, &alias_chain(), &SilentProgress)
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.skipped_enriched, 0);
    }

    // -----------------------------------------------------------------------
    // Resolution outcomes
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn brand_search_hit_writes_the_svg_logo() {
        let server = wiremock::MockServer::start().await;
        let brand_server = wiremock::MockServer::start().await;

        mount_listing(&server, json!([{"id": "r1", "fields": {"Name": "Shopify"}}])).await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/search/Shopify"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Shopify", "domain": "shopify.com"}
            ])))
            .mount(&brand_server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/brands/shopify.com"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
                "logos": [{
                    "type": "logo",
                    "formats": [
                        {"format": "png", "src": "https://cdn.brandfetch.io/shopify/logo.png"},
                        {"format": "svg", "src": "https://cdn.brandfetch.io/shopify/logo.svg"}
                    ]
                }]
            })))
            .mount(&brand_server)
            .await;

        patch_updates()
            .and(wiremock::matchers::body_json(json!({
                "records": [{
                    "id": "r1",
                    "fields": {
                        "Logo URL": "https://cdn.brandfetch.io/shopify/logo.svg",
                        "Logo File": [{"url": "https://cdn.brandfetch.io/shopify/logo.svg"}]
                    }
                }]
            })))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&server)
            .await;

        let chain = ResolverChain::new(vec![
            Box::new(AliasResolver::new()),
            Box::new(
                BrandfetchResolver::new("bf-key", "bf-client")
                    .unwrap()
                    .with_base_url(brand_server.uri()),
            ),
        ]);

        let table = table_for(&server);
        let report = run_enrichment(&test_options(), &table, &chain, &SilentProgress)
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
    }

    #[tokio::test]
    async fn alias_hit_never_reaches_later_strategies() {
        let server = wiremock::MockServer::start().await;
        let brand_server = wiremock::MockServer::start().await;

        mount_listing(&server, json!([{"id": "r1", "fields": {"Name": "dbt"}}])).await;

        patch_updates()
            .and(wiremock::matchers::body_json(json!({
                "records": [{
                    "id": "r1",
                    "fields": {
                        "Logo URL": "https://logo.clearbit.com/dbtlabs.com",
                        "Logo File": [{"url": "https://logo.clearbit.com/dbtlabs.com"}]
                    }
                }]
            })))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&server)
            .await;

        let chain = ResolverChain::new(vec![
            Box::new(AliasResolver::new()),
            Box::new(
                BrandfetchResolver::new("bf-key", "bf-client")
                    .unwrap()
                    .with_base_url(brand_server.uri()),
            ),
        ]);

        let table = table_for(&server);
        run_enrichment(&test_options(), &table, &chain, &SilentProgress)
            .await
            .unwrap();

        assert!(brand_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unresolved_names_are_skipped() {
        let server = wiremock::MockServer::start().await;
        let brand_server = wiremock::MockServer::start().await;

        mount_listing(&server, json!([{"id": "r1", "fields": {"Name": "Unknownco"}}])).await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/search/Unknownco"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&brand_server)
            .await;

        let chain = ResolverChain::new(vec![Box::new(
            BrandfetchResolver::new("bf-key", "bf-client")
                .unwrap()
                .with_base_url(brand_server.uri()),
        )]);

        let table = table_for(&server);
        let progress = RecordingProgress::default();
        let report = run_enrichment(&test_options(), &table, &chain, &progress)
            .await
            .unwrap();

        assert_eq!(report.updated, 0);
        assert_eq!(report.skipped_unresolved, 1);
        assert_eq!(
            progress.skips(),
            vec![("r1".to_string(), SkipReason::NoLogoFound)]
        );
    }

    // -----------------------------------------------------------------------
    // Batching and pacing
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn twenty_five_records_flush_as_ten_ten_five() {
        let server = wiremock::MockServer::start().await;

        let records: Vec<serde_json::Value> = (0..25)
            .map(|i| json!({"id": format!("r{i}"), "fields": {"Name": format!("Tool {i}")}}))
            .collect();
        mount_listing(&server, json!(records)).await;

        patch_updates()
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(3)
            .mount(&server)
            .await;

        let pairs: Vec<(String, String)> = (0..25)
            .map(|i| (format!("Tool {i}"), format!("tool{i}.example.com")))
            .collect();
        let borrowed: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(n, d)| (n.as_str(), d.as_str()))
            .collect();
        let chain = alias_chain_with(&borrowed);

        let table = table_for(&server);
        let progress = RecordingProgress::default();
        let report = run_enrichment(&test_options(), &table, &chain, &progress)
            .await
            .unwrap();

        assert_eq!(report.updated, 25);
        assert_eq!(progress.flushes(), vec![10, 10, 5]);
        // A pause follows each full batch; the trailing partial batch has none
        assert_eq!(progress.pacing_events(), 2);
    }

    #[tokio::test]
    async fn oversized_batch_size_is_rejected_before_any_request() {
        let server = wiremock::MockServer::start().await;

        let mut options = test_options();
        options.batch_size = MAX_BATCH_UPDATE + 1;

        let table = table_for(&server);
        let err = run_enrichment(&options, &table, &alias_chain(), &SilentProgress)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("batch size"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_batch_write_aborts_the_run() {
        let server = wiremock::MockServer::start().await;
        mount_listing(&server, json!([{"id": "r1", "fields": {"Name": "dbt"}}])).await;

        patch_updates()
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let table = table_for(&server);
        let err = run_enrichment(&test_options(), &table, &alias_chain(), &SilentProgress)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn limit_caps_the_scan() {
        let server = wiremock::MockServer::start().await;

        let records: Vec<serde_json::Value> = (0..5)
            .map(|i| json!({"id": format!("r{i}"), "fields": {"Name": format!("Tool {i}")}}))
            .collect();
        mount_listing(&server, json!(records)).await;

        patch_updates()
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&server)
            .await;

        let pairs: Vec<(String, String)> = (0..5)
            .map(|i| (format!("Tool {i}"), format!("tool{i}.example.com")))
            .collect();
        let borrowed: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(n, d)| (n.as_str(), d.as_str()))
            .collect();

        let mut options = test_options();
        options.limit = Some(2);

        let table = table_for(&server);
        let progress = RecordingProgress::default();
        let report = run_enrichment(&options, &table, &alias_chain_with(&borrowed), &progress)
            .await
            .unwrap();

        assert_eq!(report.scanned, 2);
        assert_eq!(report.updated, 2);
        assert_eq!(progress.flushes(), vec![2]);
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let server = wiremock::MockServer::start().await;

        mount_listing(
            &server,
            json!([
                {"id": "r1", "fields": {"Name": "dbt"}},
                {"id": "r2", "fields": {"Name": "v0"}},
                {"id": "r3", "fields": {"Name": "Cursor"}}
            ]),
        )
        .await;

        // No PATCH mock mounted: a write attempt would 404 and fail the run
        let mut options = test_options();
        options.batch_size = 2;
        options.dry_run = true;

        let table = table_for(&server);
        let progress = RecordingProgress::default();
        let report = run_enrichment(&options, &table, &alias_chain(), &progress)
            .await
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.updated, 3);
        assert_eq!(progress.flushes(), vec![2, 1]);
        assert_eq!(progress.pacing_events(), 0);
    }

    #[tokio::test]
    async fn second_run_rewrites_nothing() {
        // First run enriches the record
        let first = wiremock::MockServer::start().await;
        mount_listing(&first, json!([{"id": "r1", "fields": {"Name": "dbt"}}])).await;
        wiremock::Mock::given(wiremock::matchers::method("PATCH"))
            .and(wiremock::matchers::path("/appTest/Companies"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .expect(1)
            .mount(&first)
            .await;

        let report = run_enrichment(
            &test_options(),
            &table_for(&first),
            &alias_chain(),
            &SilentProgress,
        )
        .await
        .unwrap();
        assert_eq!(report.updated, 1);

        // Second run sees the written fields and leaves the record alone
        let second = wiremock::MockServer::start().await;
        mount_listing(
            &second,
            json!([{
                "id": "r1",
                "fields": {
                    "Name": "dbt",
                    "Logo URL": "https://logo.clearbit.com/dbtlabs.com",
                    "Logo File": [{"url": "https://logo.clearbit.com/dbtlabs.com"}]
                }
            }]),
        )
        .await;

        let report = run_enrichment(
            &test_options(),
            &table_for(&second),
            &alias_chain(),
            &SilentProgress,
        )
        .await
        .unwrap();

        assert_eq!(report.updated, 0);
        assert_eq!(report.skipped_enriched, 1);
    }
}
