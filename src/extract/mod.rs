//! Best-effort mapping from one HTML document to one [`RecipeRecord`].
//!
//! The extractor never fails past its boundary: any internal error is
//! converted into a degraded sentinel record, so the crawl loop can treat
//! "produced a record" and "record is usable" as separate questions.

use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::CrawlError;
use crate::model::RecipeRecord;

pub mod fields;

use self::fields::{ListFieldPlan, TextFieldPlan};

/// Placeholder for metadata fields that could not be located.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sentinel title when no heading could be found.
pub const NO_TITLE: &str = "No title";
/// Sentinel title for documents with no readable content at all.
pub const NO_TITLE_FOUND: &str = "No title found";
/// Sentinel title when extraction itself failed.
pub const PARSING_ERROR: &str = "Parsing Error";

pub struct PageExtractor;

impl PageExtractor {
    /// Extract a recipe from `html`, attributing it to the absolute
    /// `page_url`. Always returns a record; a failure inside the
    /// extraction logic yields a degraded record with the
    /// [`PARSING_ERROR`] title.
    pub fn extract(&self, html: &str, page_url: &Url) -> RecipeRecord {
        match extract_fields(html, page_url) {
            Ok(record) => record,
            Err(e) => {
                warn!("Extraction failed for {page_url}: {e}");
                degraded_record(page_url, PARSING_ERROR)
            }
        }
    }
}

fn degraded_record(page_url: &Url, title: &str) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        url: page_url.to_string(),
        ingredients: Vec::new(),
        directions: Vec::new(),
        prep_time: NOT_AVAILABLE.to_string(),
        cook_time: NOT_AVAILABLE.to_string(),
        servings: NOT_AVAILABLE.to_string(),
        image_url: String::new(),
    }
}

fn extract_fields(html: &str, page_url: &Url) -> Result<RecipeRecord, CrawlError> {
    let document = Html::parse_document(html);

    // A body with no elements means the input was empty or not really
    // HTML; report it as a degraded page rather than guessing.
    if document.select(&sel("body *")?).next().is_none() {
        return Ok(degraded_record(page_url, NO_TITLE_FOUND));
    }

    let title =
        text_field(&document, &fields::TITLE)?.unwrap_or_else(|| NO_TITLE.to_string());
    let ingredients = list_field(&document, &fields::INGREDIENTS)?;
    let directions = list_field(&document, &fields::DIRECTIONS)?;
    let prep_time = metadata_field(&document, &fields::PREP_TIME)?;
    let cook_time = metadata_field(&document, &fields::COOK_TIME)?;
    let servings = metadata_field(&document, &fields::SERVINGS)?;
    let image_url = image_field(&document, page_url)?;

    Ok(RecipeRecord {
        title,
        url: page_url.to_string(),
        ingredients,
        directions,
        prep_time,
        cook_time,
        servings,
        image_url,
    })
}

fn sel(css: &str) -> Result<Selector, CrawlError> {
    Selector::parse(css).map_err(|e| CrawlError::Extraction(format!("bad selector {css:?}: {e}")))
}

/// Whitespace-normalized text content of an element and its descendants.
fn element_text(el: &ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_field(document: &Html, plan: &TextFieldPlan) -> Result<Option<String>, CrawlError> {
    for css in plan.selectors {
        let selector = sel(css)?;
        if let Some(el) = document.select(&selector).next() {
            let text = element_text(&el);
            if !text.is_empty() {
                debug!("Found {} using selector: {}", plan.name, css);
                return Ok(Some(text));
            }
        }
    }
    label_text(document, plan)
}

fn metadata_field(document: &Html, plan: &TextFieldPlan) -> Result<String, CrawlError> {
    Ok(text_field(document, plan)?.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

/// Upper bound on the text of an element considered by the label
/// heuristic; metadata values are short, anything bigger is a wrapper.
const MAX_LABEL_TEXT: usize = 120;

/// Label-text heuristic: find a small element whose text carries one of
/// the label prefixes ("Prep:", "Yield:", ...) and take whatever follows
/// the label; when the label stands alone, take the next sibling's text.
fn label_text(document: &Html, plan: &TextFieldPlan) -> Result<Option<String>, CrawlError> {
    if plan.labels.is_empty() {
        return Ok(None);
    }
    let candidates = sel("span, div, p, li")?;
    for el in document.select(&candidates) {
        let text = element_text(&el);
        // Avoid grabbing entire page
        if text.len() > MAX_LABEL_TEXT {
            continue;
        }
        for label in plan.labels {
            let Some(idx) = text.find(label) else {
                continue;
            };
            let rest = text[idx + label.len()..].trim();
            if !rest.is_empty() {
                debug!("Found {} using label: {}", plan.name, label);
                return Ok(Some(rest.to_string()));
            }
            if let Some(sibling) = el.next_siblings().filter_map(ElementRef::wrap).next() {
                let sibling_text = element_text(&sibling);
                if !sibling_text.is_empty() {
                    debug!("Found {} in sibling of label: {}", plan.name, label);
                    return Ok(Some(sibling_text));
                }
            }
        }
    }
    Ok(None)
}

fn list_field(document: &Html, plan: &ListFieldPlan) -> Result<Vec<String>, CrawlError> {
    for css in plan.containers {
        let selector = sel(css)?;
        let Some(container) = document.select(&selector).next() else {
            continue;
        };
        let mut items = collect_items(&container, plan.items)?;
        if items.is_empty() {
            for fallback in plan.fallback_items {
                items = collect_items(&container, fallback)?;
                if !items.is_empty() {
                    break;
                }
            }
        }
        debug!("Found {} {} using container: {}", items.len(), plan.name, css);
        // The first matching container is authoritative, even when empty.
        return Ok(items);
    }
    Ok(Vec::new())
}

fn collect_items(container: &ElementRef, item_css: &str) -> Result<Vec<String>, CrawlError> {
    let selector = sel(item_css)?;
    Ok(container
        .select(&selector)
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
        .collect())
}

fn image_field(document: &Html, page_url: &Url) -> Result<String, CrawlError> {
    for css in fields::IMAGE_SELECTORS {
        let selector = sel(css)?;
        let Some(el) = document.select(&selector).next() else {
            continue;
        };
        let raw = el
            .value()
            .attr("src")
            .or_else(|| el.value().attr("data-src"))
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(raw) = raw {
            debug!("Found image using selector: {}", css);
            // Relative paths are resolved against the page URL.
            return Ok(page_url
                .join(raw)
                .map(|abs| abs.to_string())
                .unwrap_or_else(|_| raw.to_string()));
        }
    }
    Ok(String::new())
}
