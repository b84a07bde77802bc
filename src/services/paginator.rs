use std::time::Duration;

use rand::Rng;

use crate::{
    configuration::{ScraperSettings, MAX_DELAY_SECS},
    domain::{build_search_url, ListingRecord, SearchSession},
};

use super::{extract, SearchPage};

/// Walks result pages until `target_count` records are collected. Stops early
/// after `max_empty_pages` consecutive pages without listings.
pub async fn collect<P: SearchPage>(
    page: &mut P,
    mut session: SearchSession,
    settings: &ScraperSettings,
) -> anyhow::Result<Vec<ListingRecord>> {
    let max_empty_pages = settings.max_empty_pages.max(1);
    let mut empty_pages = 0;
    let mut records: Vec<ListingRecord> = vec![];

    while records.len() < session.target_count {
        let url = session.current_url(&settings.base_url)?;
        log::info!("Visiting page {} for '{}'", session.page_index, session.term);

        page.open(&url).await?;
        pause(settings).await;

        let found = extract(&*page).await?;
        log::info!(
            "Found {} listings on page {} | {} of {} collected",
            found.len(),
            session.page_index,
            (records.len() + found.len()).min(session.target_count),
            session.target_count
        );
        session.page_index += 1;

        if found.is_empty() {
            empty_pages += 1;
            if empty_pages >= max_empty_pages {
                log::warn!(
                    "Stopping '{}' after {} empty pages with {} of {} listings",
                    session.term,
                    empty_pages,
                    records.len(),
                    session.target_count
                );
                break;
            }
            continue;
        }

        empty_pages = 0;
        records.extend(found);
        records.truncate(session.target_count);
    }

    Ok(records)
}

/// One navigation to the first results page, no delay and no target.
pub async fn search<P: SearchPage>(
    page: &mut P,
    term: &str,
    settings: &ScraperSettings,
) -> anyhow::Result<Vec<ListingRecord>> {
    let url = build_search_url(&settings.base_url, term, 1)?;
    log::info!("Visiting first page for '{}'", term);

    page.open(&url).await?;
    extract(&*page).await
}

async fn pause(settings: &ScraperSettings) {
    let delay = random_delay(settings.min_delay_secs, settings.max_delay_secs);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn random_delay(min_secs: f64, max_secs: f64) -> Duration {
    let (min_secs, max_secs) = (clamp_delay(min_secs), clamp_delay(max_secs));
    let low = min_secs.min(max_secs);
    let high = min_secs.max(max_secs);

    if high <= low {
        return Duration::from_secs_f64(low);
    }

    Duration::from_secs_f64(rand::thread_rng().gen_range(low..=high))
}

/// Non-finite values count as no delay; the rest is held to `0..=MAX_DELAY_SECS`.
fn clamp_delay(secs: f64) -> f64 {
    if secs.is_finite() {
        secs.clamp(0.0, MAX_DELAY_SECS)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        configuration::{ScraperSettings, MAX_DELAY_SECS},
        domain::SearchSession,
        services::fixtures::{results_page, CardFixture, FixturePages},
    };

    use super::{collect, random_delay, search};

    fn settings() -> ScraperSettings {
        ScraperSettings {
            base_url: "https://shop.test/s".to_string(),
            min_delay_secs: 0.0,
            max_delay_secs: 0.0,
            ..Default::default()
        }
    }

    fn page_of(page: usize, len: usize) -> String {
        let cards: Vec<CardFixture> = (1..=len)
            .map(|i| CardFixture {
                title: Some(format!("p{}-{}", page, i)),
                ..CardFixture::full(i)
            })
            .collect();
        results_page(&cards)
    }

    #[tokio::test]
    async fn collect_truncates_to_target_across_pages() {
        let mut page = FixturePages::new(vec![page_of(1, 16), page_of(2, 16), page_of(3, 16)]);

        let records = collect(&mut page, SearchSession::new("mouse", 25), &settings())
            .await
            .unwrap();

        assert_eq!(records.len(), 25);
        let titles: Vec<String> = records.into_iter().filter_map(|r| r.title).collect();
        let expected: Vec<String> = (1..=16)
            .map(|i| format!("p1-{}", i))
            .chain((1..=9).map(|i| format!("p2-{}", i)))
            .collect();
        assert_eq!(titles, expected);
        assert_eq!(page.visited_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn collect_builds_paged_urls() {
        let mut page = FixturePages::new(vec![page_of(1, 2), page_of(2, 2)]);

        collect(&mut page, SearchSession::new("wireless mouse", 3), &settings())
            .await
            .unwrap();

        let urls: Vec<&str> = page.visited.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://shop.test/s?k=wireless+mouse&page=1",
                "https://shop.test/s?k=wireless+mouse&page=2",
            ]
        );
    }

    #[tokio::test]
    async fn collect_stops_after_consecutive_empty_pages() {
        let mut page = FixturePages::new(vec![page_of(1, 4)]);

        let records = collect(&mut page, SearchSession::new("mouse", 10), &settings())
            .await
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(page.visited_pages(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn empty_page_streak_resets_on_results() {
        let empty = results_page(&[]);
        let mut page = FixturePages::new(vec![
            page_of(1, 2),
            empty.clone(),
            empty,
            page_of(4, 2),
        ]);

        let records = collect(&mut page, SearchSession::new("mouse", 4), &settings())
            .await
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(page.visited_pages(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn zero_target_never_navigates() {
        let mut page = FixturePages::new(vec![page_of(1, 16)]);

        let records = collect(&mut page, SearchSession::new("mouse", 0), &settings())
            .await
            .unwrap();

        assert!(records.is_empty());
        assert!(page.visited.is_empty());
    }

    #[tokio::test]
    async fn failure_mid_loop_discards_earlier_pages() {
        let mut page = FixturePages::new(vec![page_of(1, 16), page_of(2, 16)]);
        page.fail_on_page = Some(2);

        let result = collect(&mut page, SearchSession::new("mouse", 25), &settings()).await;

        assert!(result.is_err());
        assert_eq!(page.visited_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn search_reads_only_the_first_page() {
        let mut page = FixturePages::new(vec![page_of(1, 16), page_of(2, 16)]);

        let records = search(&mut page, "mouse", &settings()).await.unwrap();

        assert_eq!(records.len(), 16);
        assert_eq!(page.visited_pages(), vec![1]);
    }

    #[test]
    fn random_delay_stays_in_range() {
        for _ in 0..100 {
            let delay = random_delay(2.0, 4.0);
            assert!(delay >= Duration::from_secs(2));
            assert!(delay <= Duration::from_secs(4));
        }
    }

    #[test]
    fn random_delay_handles_swapped_and_negative_bounds() {
        assert!(random_delay(4.0, 2.0) >= Duration::from_secs(2));
        assert_eq!(random_delay(-1.0, 0.0), Duration::ZERO);
        assert_eq!(random_delay(1.5, 1.5), Duration::from_secs_f64(1.5));
    }

    #[test]
    fn random_delay_survives_unbounded_values() {
        assert!(random_delay(2.0, f64::INFINITY) <= Duration::from_secs(2));
        assert_eq!(random_delay(f64::NAN, f64::NAN), Duration::ZERO);
        assert_eq!(
            random_delay(1e20, 1e20),
            Duration::from_secs_f64(MAX_DELAY_SECS)
        );
        assert!(random_delay(0.0, 1e20) <= Duration::from_secs_f64(MAX_DELAY_SECS));
    }
}
