use std::sync::Arc;

use chrono::Local;
use tokio::{fs::File, io::AsyncWriteExt, task::spawn_blocking};

use crate::aggregate::{Merge, NameCounts};
use crate::parse::IndexPage;
use crate::partition::{self, PageChunk};
use crate::request::{PageFetcher, RecordSource};
use crate::{
    extract, info_time, stats, variants, Result, BASE_URL, EXCLUDE_MIDDLE_NAMES, MAX_PAGE,
    OUTPUT_PATH, UNKNOWN_NAME_MARKER, VARIANT_THRESHOLD, WORKER_COUNT,
};

/// Scrapes the whole surname index, writes the ranked first-name counts to
/// [`OUTPUT_PATH`] and reports spelling variants of the most common name.
pub async fn run_census() -> Result<()> {
    let start_time = Local::now();
    let source = Arc::new(RecordSource::new(BASE_URL, MAX_PAGE));
    let plan = partition::plan(source.max_page(), WORKER_COUNT)?;
    info_time!(
        "Scraping {} index pages across {} workers",
        MAX_PAGE,
        WORKER_COUNT
    );

    let counts: NameCounts = aggregate_pages(source, plan, |page| {
        extract::count_first_names(page, EXCLUDE_MIDDLE_NAMES)
    })
    .await?;
    info_time!(start_time, "Aggregated {} distinct first names", counts.len());

    let counts = stats::filter_counts(&counts, |name, _| name != UNKNOWN_NAME_MARKER);
    report(&counts).await
}

/// Runs one worker per chunk of the plan and folds all worker results into
/// a single aggregate.
///
/// Workers fetch their pages strictly in ascending order and each owns its
/// accumulator until the join, so no locking is needed anywhere. The fold
/// happens only after every worker has finished, and its order is
/// irrelevant because merging is commutative and associative.
pub async fn aggregate_pages<S, A, F>(source: Arc<S>, plan: Vec<PageChunk>, extract: F) -> Result<A>
where
    S: PageFetcher + 'static,
    A: Merge + Send + 'static,
    F: Fn(&IndexPage) -> Result<A> + Send + Sync + 'static,
{
    let extract = Arc::new(extract);
    let mut workers = Vec::with_capacity(plan.len());
    for chunk in plan {
        workers.push(tokio::spawn(scrape_chunk(
            Arc::clone(&source),
            chunk,
            Arc::clone(&extract),
        )));
    }

    let mut partials = Vec::with_capacity(workers.len());
    for worker in workers {
        partials.push(worker.await??);
    }

    Ok(partials.into_iter().fold(A::default(), Merge::merge))
}

/// Sequentially scrapes one chunk of pages into a worker-local aggregate.
///
/// A failed page is skipped, never fatal: partial coverage beats losing the
/// whole run. Only a dead parser task ends the worker early.
async fn scrape_chunk<S, A, F>(source: Arc<S>, chunk: PageChunk, extract: Arc<F>) -> Result<A>
where
    S: PageFetcher + 'static,
    A: Merge + Send + 'static,
    F: Fn(&IndexPage) -> Result<A> + Send + Sync + 'static,
{
    let mut local = A::default();
    for index in chunk.pages() {
        let html = match source.fetch(index).await {
            Ok(html) => html,
            Err(err) => {
                info_time!("skipping page {}: {}", index, err);
                continue;
            }
        };
        // The parsed DOM is not Send, so parsing and extraction stay
        // together inside the blocking task.
        let extracted = spawn_blocking({
            let extract = Arc::clone(&extract);
            move || extract(&IndexPage::parse(&html))
        })
        .await?;
        match extracted {
            Ok(partial) => local = local.merge(partial),
            Err(err) => info_time!("skipping page {}: {}", index, err),
        }
    }
    Ok(local)
}

/// Writes the ranked counts to disk and prints the likely spelling
/// variants of the most common name.
async fn report(counts: &NameCounts) -> Result<()> {
    let ranked = stats::by_count_desc(counts);
    let mut lines = String::with_capacity(ranked.len() * 16);
    for (name, count) in &ranked {
        lines.push_str(&format!("{name}: {count}\n"));
    }

    let write_start = Local::now();
    let mut file = File::create(OUTPUT_PATH).await?;
    file.write_all(lines.as_bytes()).await?;
    info_time!(write_start, "Wrote {} names to {}", ranked.len(), OUTPUT_PATH);

    if let Some(&(top, count)) = ranked.first() {
        info_time!("Most common first name: {} ({} records)", top, count);
        let scores = variants::find_variant_scores(
            top,
            counts.keys().map(String::as_str),
            VARIANT_THRESHOLD,
        );
        for (name, score) in scores {
            if name != top {
                println!("    {name:<20} ~ {top} ({score:.3})");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::aggregate::YearNames;
    use crate::Error;

    /// Serves canned page HTML; 1-based like the live index.
    struct StubSource {
        pages: Vec<String>,
    }

    #[async_trait]
    impl PageFetcher for StubSource {
        async fn fetch(&self, index: usize) -> Result<String> {
            self.pages
                .get(index.wrapping_sub(1))
                .cloned()
                .ok_or(Error::PageOutOfRange {
                    index,
                    max_page: self.pages.len(),
                })
        }
    }

    fn name_page(names: &[&str]) -> String {
        let links: String = names
            .iter()
            .map(|name| format!(r#"<a href="record.htm">{name}</a><br/>"#))
            .collect();
        format!("<html><body><dl><dt>X</dt><dd>{links}</dd></dl></body></html>")
    }

    #[tokio::test]
    async fn counts_aggregate_across_workers() {
        let source = Arc::new(StubSource {
            pages: vec![
                name_page(&["Mary Smith", "John Tanner", "Mary Plummer"]),
                name_page(&["Mary Gale"]),
                name_page(&["Ann Weeks"]),
            ],
        });
        let plan = partition::plan(3, 2).unwrap();

        let counts: NameCounts = aggregate_pages(source, plan, |page| {
            extract::count_first_names(page, true)
        })
        .await
        .unwrap();

        let expected: NameCounts = [("Mary", 3), ("John", 1), ("Ann", 1)]
            .iter()
            .map(|(n, c)| (n.to_string(), *c))
            .collect();
        assert_eq!(counts, expected);
    }

    #[tokio::test]
    async fn out_of_range_pages_are_skipped_not_fatal() {
        let source = Arc::new(StubSource {
            pages: vec![name_page(&["Mary Smith"]), name_page(&["John Tanner"])],
        });
        // The plan covers twice as many pages as the source can serve.
        let plan = partition::plan(4, 2).unwrap();

        let counts: NameCounts = aggregate_pages(source, plan, |page| {
            extract::count_first_names(page, true)
        })
        .await
        .unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Mary"], 1);
        assert_eq!(counts["John"], 1);
    }

    #[tokio::test]
    async fn malformed_pages_are_skipped_not_fatal() {
        let source = Arc::new(StubSource {
            pages: vec![
                name_page(&["Mary Smith"]),
                "<html><body><p>site maintenance</p></body></html>".to_string(),
                name_page(&["Mary Gale"]),
            ],
        });
        let plan = partition::plan(3, 3).unwrap();

        let counts: NameCounts = aggregate_pages(source, plan, |page| {
            extract::count_first_names(page, true)
        })
        .await
        .unwrap();

        assert_eq!(counts, [("Mary".to_string(), 2)].into_iter().collect());
    }

    #[tokio::test]
    async fn a_zero_page_chunk_contributes_the_identity() {
        let source = Arc::new(StubSource {
            pages: vec![name_page(&["Mary Smith"])],
        });
        // One real chunk plus a zero-count chunk for the second worker.
        let plan = vec![
            PageChunk { start: 1, count: 1 },
            PageChunk { start: 2, count: 0 },
        ];

        let counts: NameCounts = aggregate_pages(source, plan, |page| {
            extract::count_first_names(page, true)
        })
        .await
        .unwrap();

        assert_eq!(counts, [("Mary".to_string(), 1)].into_iter().collect());
    }

    #[tokio::test]
    async fn the_pipeline_also_runs_dated_extractions() {
        let source = Arc::new(StubSource {
            pages: vec![
                r#"<dl><dd><a href="1.htm">Mary Ann Smith</a> b. c 1830, Mere<br/>
<a href="2.htm">John Gale</a> b. 1850, Devizes<br/></dd></dl>"#
                    .to_string(),
                r#"<dl><dd><a href="3.htm">Jane Weeks</a> b. 1830, Calne<br/></dd></dl>"#
                    .to_string(),
            ],
        });
        let plan = partition::plan(2, 2).unwrap();

        let by_year: YearNames<i32> = aggregate_pages(source, plan, |page| {
            extract::names_by_birth_year_normalized(page, true)
        })
        .await
        .unwrap();

        assert_eq!(
            by_year[&1830],
            vec!["Mary".to_string(), "Jane".to_string()]
        );
        assert_eq!(by_year[&1850], vec!["John".to_string()]);
    }
}
