use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use recipe_crawler::{
    CrawlError, Crawler, CrawlerConfig, CrawlRequest, FetchStrategy, NullProgress, Progress,
};

fn recipe_html(title: &str) -> String {
    format!(
        r#"
        <html>
            <body>
                <h1 class="recipe-title">{title}</h1>
                <ul class="recipe-ingredients__list">
                    <li>1 cup flour</li>
                    <li>2 eggs</li>
                </ul>
                <ul class="recipe-directions__list">
                    <li>Mix everything.</li>
                    <li>Bake.</li>
                </ul>
                <div class="prep-time">10 min</div>
            </body>
        </html>
        "#
    )
}

fn test_config(server: &mockito::ServerGuard) -> CrawlerConfig {
    CrawlerConfig {
        base_url: server.url(),
        delay_min: 0.0,
        delay_max: 0.0,
        ..CrawlerConfig::default()
    }
}

fn request(urls: Vec<&str>, max_items: usize) -> CrawlRequest {
    CrawlRequest {
        urls: urls.into_iter().map(String::from).collect(),
        fetch_strategy: FetchStrategy::Http,
        max_items,
        delay_range: (0.0, 0.0),
    }
}

#[tokio::test]
async fn test_failed_fetch_skips_item_but_continues() {
    let mut server = mockito::Server::new_async().await;

    let ok = server
        .mock("GET", "/ok")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(recipe_html("First Recipe"))
        .expect(1)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/500")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let ok2 = server
        .mock("GET", "/ok2")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(recipe_html("Second Recipe"))
        .expect(1)
        .create_async()
        .await;

    let crawler = Crawler::new(test_config(&server));
    let result = crawler
        .run(&request(vec!["/ok", "/500", "/ok2"], 10), &mut NullProgress)
        .await
        .unwrap();

    ok.assert_async().await;
    broken.assert_async().await;
    ok2.assert_async().await;

    assert_eq!(result.attempted, 3);
    assert_eq!(result.succeeded, 2);
    assert_eq!(result.records.len(), 2);
    // Input order is preserved, minus the failed item.
    assert_eq!(result.records[0].title, "First Recipe");
    assert_eq!(result.records[1].title, "Second Recipe");
}

#[tokio::test]
async fn test_records_carry_absolute_urls() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/pie")
        .with_status(200)
        .with_body(recipe_html("Pie"))
        .create_async()
        .await;

    let crawler = Crawler::new(test_config(&server));
    let result = crawler
        .run(&request(vec!["/recipes/pie"], 10), &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].url, format!("{}/recipes/pie", server.url()));
    assert!(result.records[0].url.starts_with("http://"));
}

#[tokio::test]
async fn test_max_items_truncates_before_fetching() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/r1")
        .with_status(200)
        .with_body(recipe_html("One"))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/r2")
        .with_status(200)
        .with_body(recipe_html("Two"))
        .expect(1)
        .create_async()
        .await;
    // URLs past the cap must never be requested.
    let never = [
        server.mock("GET", "/r3").expect(0).create_async().await,
        server.mock("GET", "/r4").expect(0).create_async().await,
        server.mock("GET", "/r5").expect(0).create_async().await,
    ];

    let crawler = Crawler::new(test_config(&server));
    let result = crawler
        .run(
            &request(vec!["/r1", "/r2", "/r3", "/r4", "/r5"], 2),
            &mut NullProgress,
        )
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    for mock in &never {
        mock.assert_async().await;
    }

    assert_eq!(result.attempted, 2);
    assert_eq!(result.records.len(), 2);
}

#[tokio::test]
async fn test_unusable_record_is_dropped() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/good")
        .with_status(200)
        .with_body(recipe_html("Good Recipe"))
        .create_async()
        .await;
    // Page with no heading at all: extraction yields a sentinel title.
    let _bad = server
        .mock("GET", "/bare")
        .with_status(200)
        .with_body("<html><body><p>nothing here</p></body></html>")
        .create_async()
        .await;

    let crawler = Crawler::new(test_config(&server));
    let result = crawler
        .run(&request(vec!["/bare", "/good"], 10), &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(result.attempted, 2);
    assert_eq!(result.succeeded, 1);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].title, "Good Recipe");
}

#[tokio::test]
async fn test_empty_body_is_excluded_from_records() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/empty")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let crawler = Crawler::new(test_config(&server));
    let result = crawler
        .run(&request(vec!["/empty"], 10), &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(result.attempted, 1);
    assert_eq!(result.succeeded, 0);
    assert!(result.records.is_empty());
}

#[tokio::test]
async fn test_progress_is_reported_per_item() {
    struct Recording {
        begun_with: Option<usize>,
        items: Vec<(usize, usize)>,
        finished: bool,
    }
    impl Progress for Recording {
        fn begin(&mut self, total: usize) {
            self.begun_with = Some(total);
        }
        fn item_done(&mut self, index: usize, total: usize, _status: &str) {
            self.items.push((index, total));
        }
        fn finish(&mut self, _succeeded: usize, _attempted: usize) {
            self.finished = true;
        }
    }

    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/a")
        .with_status(200)
        .with_body(recipe_html("A"))
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/b")
        .with_status(404)
        .create_async()
        .await;

    let mut progress = Recording {
        begun_with: None,
        items: Vec::new(),
        finished: false,
    };
    let crawler = Crawler::new(test_config(&server));
    crawler
        .run(&request(vec!["/a", "/b"], 10), &mut progress)
        .await
        .unwrap();

    assert_eq!(progress.begun_with, Some(2));
    // Both outcomes are reported, success and failure alike.
    assert_eq!(progress.items, vec![(1, 2), (2, 2)]);
    assert!(progress.finished);
}

#[tokio::test]
async fn test_cancel_flag_stops_before_first_item() {
    let mut server = mockito::Server::new_async().await;
    let never = server.mock("GET", "/x").expect(0).create_async().await;

    let cancel = Arc::new(AtomicBool::new(false));
    cancel.store(true, Ordering::Relaxed);

    let crawler = Crawler::new(test_config(&server)).with_cancel_flag(cancel);
    let result = crawler
        .run(&request(vec!["/x"], 10), &mut NullProgress)
        .await
        .unwrap();

    never.assert_async().await;
    assert_eq!(result.attempted, 0);
    assert!(result.records.is_empty());
}

#[tokio::test]
async fn test_js_rendered_without_renderer_is_configuration_error() {
    let mut server = mockito::Server::new_async().await;
    let never = server.mock("GET", "/x").expect(0).create_async().await;

    let config = test_config(&server);
    assert!(config.renderer.is_none());

    let crawler = Crawler::new(config);
    let mut req = request(vec!["/x"], 10);
    req.fetch_strategy = FetchStrategy::JsRendered;

    let err = crawler.run(&req, &mut NullProgress).await.unwrap_err();
    assert!(matches!(err, CrawlError::Configuration(_)));
    // Fails fast: no fetch was attempted.
    never.assert_async().await;
}
