//! Per-field extraction plans.
//!
//! Each field of a recipe page is described as data: an ordered chain of
//! CSS selectors (most specific known markup first, most generic last) and,
//! for the small metadata fields, label prefixes for the text heuristic.
//! Supporting a new site pattern means appending to a chain, not adding a
//! branch to the extraction code.

/// Ordered selector chain for a scalar text field.
pub struct TextFieldPlan {
    pub name: &'static str,
    /// CSS selectors tried in order; the first non-empty text wins.
    pub selectors: &'static [&'static str],
    /// Label prefixes for the label-text heuristic, tried after the
    /// selector chain is exhausted.
    pub labels: &'static [&'static str],
}

/// Ordered container chain for a list field. The first matching container
/// is terminal: its items are the result even when empty.
pub struct ListFieldPlan {
    pub name: &'static str,
    pub containers: &'static [&'static str],
    /// Item selector evaluated inside the matched container.
    pub items: &'static str,
    /// Generic text-block selectors used when `items` yields nothing.
    pub fallback_items: &'static [&'static str],
}

pub const TITLE: TextFieldPlan = TextFieldPlan {
    name: "title",
    selectors: &["h1.recipe-title", "h1.entry-title", "h1"],
    labels: &[],
};

pub const PREP_TIME: TextFieldPlan = TextFieldPlan {
    name: "prep_time",
    selectors: &["div.prep-time", "span.prep-time"],
    labels: &["Prep:"],
};

pub const COOK_TIME: TextFieldPlan = TextFieldPlan {
    name: "cook_time",
    selectors: &["div.cook-time", "span.cook-time"],
    labels: &["Cook:"],
};

pub const SERVINGS: TextFieldPlan = TextFieldPlan {
    name: "servings",
    selectors: &["div.servings", "span.servings"],
    labels: &["Yield:", "Servings:"],
};

pub const INGREDIENTS: ListFieldPlan = ListFieldPlan {
    name: "ingredients",
    containers: &[
        "ul.recipe-ingredients__list",
        "div.recipe-ingredients",
        "div.ingredients",
    ],
    items: "li",
    fallback_items: &["span"],
};

pub const DIRECTIONS: ListFieldPlan = ListFieldPlan {
    name: "directions",
    containers: &[
        "ul.recipe-directions__list",
        "div.recipe-directions",
        "div.directions",
    ],
    items: "li",
    fallback_items: &["p"],
};

/// Image element chain; `src` is read first, then the lazy-load
/// `data-src` attribute.
pub const IMAGE_SELECTORS: &[&str] = &["img.primary-image", ".recipe-image img", "img"];
