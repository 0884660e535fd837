use log::error;
use std::env;
use std::fs;

use recipe_crawler::{
    export, Crawler, CrawlerConfig, CrawlRequest, FetchStrategy, Progress,
};

/// Curated Taste of Home recipe pages used when no URLs are given.
const DEFAULT_URLS: [&str; 10] = [
    "https://www.tasteofhome.com/recipes/favorite-chicken-potpie/",
    "https://www.tasteofhome.com/recipes/puff-pastry-chicken-potpie/",
    "https://www.tasteofhome.com/recipes/chicken-potpie-soup/",
    "https://www.tasteofhome.com/recipes/homemade-chicken-potpie/",
    "https://www.tasteofhome.com/recipes/ham-potpie/",
    "https://www.tasteofhome.com/recipes/buttermilk-biscuit-ham-potpie/",
    "https://www.tasteofhome.com/recipes/buttermilk-biscuits/",
    "https://www.tasteofhome.com/recipes/buttermilk-pancakes/",
    "https://www.tasteofhome.com/recipes/buttermilk-chocolate-cupcakes/",
    "https://www.tasteofhome.com/recipes/orange-buttermilk-cupcakes/",
];

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        println!("Scraping {total} recipe pages...");
    }

    fn item_done(&mut self, index: usize, total: usize, status: &str) {
        println!("[{index}/{total}] {status}");
    }

    fn finish(&mut self, succeeded: usize, attempted: usize) {
        println!("Done! Fetched {succeeded} recipes out of {attempted} pages.");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut urls: Vec<String> = Vec::new();
    let mut out_path = "recipes.csv".to_string();
    let mut max_items: Option<usize> = None;
    let mut js_rendered = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                out_path = args.next().ok_or("--out requires a file path")?;
            }
            "--max" => {
                let n = args.next().ok_or("--max requires a number")?;
                max_items = Some(n.parse()?);
            }
            "--urls-file" => {
                let path = args.next().ok_or("--urls-file requires a file path")?;
                let content = fs::read_to_string(&path)?;
                urls.extend(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(String::from),
                );
            }
            "--js" => js_rendered = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            url => urls.push(url.to_string()),
        }
    }

    if urls.is_empty() {
        urls = DEFAULT_URLS.iter().map(|s| s.to_string()).collect();
    }

    let config = CrawlerConfig::load()?;
    let request = CrawlRequest {
        max_items: max_items.unwrap_or(config.max_items),
        urls,
        fetch_strategy: if js_rendered {
            FetchStrategy::JsRendered
        } else {
            FetchStrategy::Http
        },
        delay_range: (config.delay_min, config.delay_max),
    };

    let result = Crawler::new(config)
        .run(&request, &mut ConsoleProgress)
        .await?;

    if result.records.is_empty() {
        error!("No recipes to save.");
        return Ok(());
    }

    export::save_csv(&out_path, &result.records)?;
    println!("Saved {} recipes to {out_path}.", result.records.len());

    Ok(())
}

fn print_usage() {
    println!(
        "Usage: recipe-crawler [OPTIONS] [URL...]\n\n\
         Options:\n\
         \x20 --urls-file <path>  Read page URLs from a file, one per line\n\
         \x20 --out <path>        CSV output path (default: recipes.csv)\n\
         \x20 --max <n>           Cap the number of pages fetched\n\
         \x20 --js                Fetch through the configured JS renderer\n"
    );
}
