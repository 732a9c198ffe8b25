//! Batch reformat engine
//!
//! Pages are fetched sequentially so an aborted run leaves an obvious
//! resume offset; rows inside a page are independent and fan out to a
//! fixed pool of workers pulling indices off a shared atomic counter.

use crate::error::{ReformatError, Result};
use crate::options::ReformatOptions;
use crate::plan::plan_row;
use backlinkoo_client::SupabaseClient;
use backlinkoo_core::domain::post::AutomationPost;
use backlinkoo_core::domain::stats::{RowOutcome, RunStats};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Drives a full reformat run against one Supabase project
pub struct ReformatEngine {
    client: Arc<SupabaseClient>,
    options: ReformatOptions,
}

impl ReformatEngine {
    /// Creates an engine for the given client and options
    pub fn new(client: SupabaseClient, options: ReformatOptions) -> Self {
        Self {
            client: Arc::new(client),
            options,
        }
    }

    /// Runs the batch job and returns merged statistics
    ///
    /// Aborts on option validation errors, an unresolvable `--domain`, or
    /// any page fetch failure. Individual PATCH failures are logged,
    /// counted, and never retried.
    pub async fn run(&self) -> Result<RunStats> {
        self.options.validate()?;

        let domain_id = match &self.options.domain {
            Some(name) => {
                let record = self
                    .client
                    .resolve_domain(name)
                    .await?
                    .ok_or_else(|| ReformatError::DomainNotFound(name.clone()))?;
                info!(domain = %record.domain, id = %record.id, "restricting run to domain");
                Some(record.id)
            }
            None => None,
        };

        if self.options.dry_run {
            info!("dry run: changes are detected but nothing is written");
        }

        let mut stats = RunStats::default();
        let mut offset = self.options.offset;
        let mut page_index = 0usize;

        loop {
            let remaining = self.options.limit.map(|l| l.saturating_sub(stats.scanned));
            if remaining == Some(0) {
                break;
            }
            let page_size = remaining.map_or(self.options.page_size, |r| {
                r.min(self.options.page_size)
            });

            let posts = self.client.list_posts(offset, page_size, domain_id).await?;
            let fetched = posts.len();
            if fetched == 0 {
                break;
            }

            let page_stats = self.process_page(posts).await;
            stats.merge(page_stats);

            info!(
                page = page_index,
                scanned = stats.scanned,
                updated = stats.updated,
                failed = stats.failed,
                "page complete"
            );

            if fetched < page_size {
                break;
            }
            offset += fetched;
            page_index += 1;
        }

        Ok(stats)
    }

    /// Fans one page of rows out to the worker pool
    async fn process_page(&self, posts: Vec<AutomationPost>) -> RunStats {
        let posts = Arc::new(posts);
        let next_index = Arc::new(AtomicUsize::new(0));
        let workers = self.options.workers.min(posts.len()).max(1);

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let client = Arc::clone(&self.client);
            let posts = Arc::clone(&posts);
            let next_index = Arc::clone(&next_index);
            let dry_run = self.options.dry_run;

            handles.push(tokio::spawn(async move {
                let mut local = RunStats::default();
                loop {
                    let index = next_index.fetch_add(1, Ordering::Relaxed);
                    let Some(post) = posts.get(index) else {
                        break;
                    };
                    let outcome = process_row(&client, post, dry_run).await;
                    local.record(outcome);
                }
                local
            }));
        }

        let mut page_stats = RunStats::default();
        for handle in handles {
            match handle.await {
                Ok(local) => page_stats.merge(local),
                Err(e) => warn!("row worker panicked: {}", e),
            }
        }
        page_stats
    }
}

/// Repairs a single row
async fn process_row(client: &SupabaseClient, post: &AutomationPost, dry_run: bool) -> RowOutcome {
    let plan = plan_row(post);
    if plan.is_noop() {
        return RowOutcome::Unchanged;
    }

    let title_fixed = plan.title.is_some();
    let content_fixed = plan.content.is_some();

    if dry_run {
        debug!(id = %post.id, title_fixed, content_fixed, "dry run, write skipped");
        return RowOutcome::Updated {
            title_fixed,
            content_fixed,
        };
    }

    let patch = plan.into_patch();
    match client.update_post(post.id, &patch).await {
        Ok(()) => {
            debug!(id = %post.id, title_fixed, content_fixed, "row updated");
            RowOutcome::Updated {
                title_fixed,
                content_fixed,
            }
        }
        Err(error) => {
            warn!(id = %post.id, error = %error, "PATCH failed, row skipped");
            RowOutcome::Failed
        }
    }
}
