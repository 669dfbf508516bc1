//! HTML extraction for search, hub, and review pages.
//!
//! Everything here is best effort. A missing node yields an empty string,
//! zero, `false`, or an empty list; nothing in this module returns an error.
//! `scraper` documents are `!Send`, so parse and drop them before any await.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::{Game, GameDetails, Rating, Review, ReviewPage};

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Collapse whitespace runs to single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`clean_text`] but keeps line structure: each line is cleaned and
/// blank lines are dropped.
pub fn clean_block(text: &str) -> String {
    text.lines()
        .map(clean_text)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).next();
    found
}

fn exists(scope: ElementRef<'_>, css: &str) -> bool {
    first(scope, css).is_some()
}

fn first_text(scope: ElementRef<'_>, css: &str) -> String {
    first(scope, css)
        .map(|el| clean_text(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Text of `el` with `<br>` as the only line break and any subtree carrying one
/// of `skip_classes` left out. Whitespace inside text nodes, source newlines
/// included, folds to single spaces.
fn block_text(el: ElementRef<'_>, skip_classes: &[&str]) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        let skipped = node
            .ancestors()
            .take_while(|a| a.id() != el.id())
            .any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| e.classes().any(|c| skip_classes.contains(&c)))
            });
        if skipped {
            continue;
        }
        if let Some(text) = node.value().as_text() {
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        } else if node.value().as_element().is_some_and(|e| e.name() == "br") {
            out.push('\n');
        }
    }
    clean_block(&out)
}

/// Leading integer of `text`, ignoring thousands separators. 0 if none.
fn leading_count(text: &str) -> u64 {
    text.trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Rows of the `/search/` results page. Rows without a name or app id are skipped.
pub fn parse_search_results(html: &str) -> Vec<Game> {
    let document = Html::parse_document(html);
    let Some(row_sel) = selector(".search_result_row") else {
        return Vec::new();
    };

    document
        .select(&row_sel)
        .filter_map(|row| {
            let app_id = row.value().attr("data-ds-appid").unwrap_or("").trim().to_string();
            let title = first(row, ".search_name .title");
            let name = title
                .map(|t| clean_text(&t.text().collect::<String>()))
                .unwrap_or_default();
            let url = title
                .and_then(|t| t.value().attr("href"))
                .unwrap_or("")
                .to_string();

            if name.is_empty() || app_id.is_empty() {
                return None;
            }
            Some(Game {
                id: app_id.clone(),
                name,
                app_id,
                url,
            })
        })
        .collect()
}

// ── Details ─────────────────────────────────────────────────────────────────

pub fn parse_game_details(html: &str, app_id: &str, url: &str) -> GameDetails {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let tags: Vec<String> = selector(".app_tag")
        .map(|sel| {
            root.select(&sel)
                .map(|t| clean_text(&t.text().collect::<String>()))
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    GameDetails {
        app_id: app_id.to_string(),
        name: first_text(root, ".apphub_AppName"),
        description: first(root, ".game_description_snippet")
            .map(|el| block_text(el, &[]))
            .unwrap_or_default(),
        price: first_text(root, ".game_purchase_price"),
        tags,
        release_date: first_text(root, ".release_date .date"),
        url: url.to_string(),
    }
}

// ── Reviews ─────────────────────────────────────────────────────────────────

pub fn parse_rating(has_positive: bool, has_negative: bool) -> Rating {
    match (has_positive, has_negative) {
        (true, true) => Rating::Mixed,
        (true, false) => Rating::Positive,
        _ => Rating::Negative,
    }
}

/// Hours on record from text like "12.5 hours", "1,024 hrs on record", or "3 小时".
pub fn parse_playtime(text: &str) -> f64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(?:hours?|hrs?|小时)").expect("valid regex")
    });

    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Total review count from the filter summary text, in either the Chinese
/// ("共 123 条评论") or English ("of 1,234 reviews") layout.
pub fn parse_total_count_text(text: &str) -> u64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)共\s*([\d,]+)\s*条评论|of\s+([\d,]+)\s+reviews?").expect("valid regex")
    });

    re.captures(text)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0)
}

fn parse_total_count(document: &Html) -> u64 {
    let text = selector(".reviews_filter_options .reviews_filter_summary")
        .map(|sel| {
            document
                .select(&sel)
                .flat_map(|el| el.text())
                .collect::<String>()
        })
        .unwrap_or_default();
    parse_total_count_text(&text)
}

pub fn has_more(offset: u32, per_page: u32, total: u64) -> bool {
    u64::from(offset) + u64::from(per_page) < total
}

fn parse_review_card(card: ElementRef<'_>) -> Option<Review> {
    let author_el = first(card, ".apphub_CardContentAuthorName");
    let author = author_el
        .map(|el| clean_text(&el.text().collect::<String>()))
        .unwrap_or_default();
    let author_id = author_el
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| href.split('/').filter(|s| !s.is_empty()).last())
        .unwrap_or("")
        .to_string();
    let review = first(card, ".apphub_CardTextContent")
        .map(|el| block_text(el, &["date_posted", "early_access_review"]))
        .unwrap_or_default();

    if author.is_empty() || review.is_empty() {
        return None;
    }

    let language = first_text(card, ".apphub_CardLanguage");

    Some(Review {
        id: card.value().attr("data-gid").unwrap_or("").to_string(),
        author,
        author_id,
        review,
        rating: parse_rating(
            exists(card, ".title.positive"),
            exists(card, ".title.negative"),
        ),
        helpful_count: leading_count(&first_text(card, ".found_helpful .found_helpful_yes")),
        unhelpful_count: leading_count(&first_text(card, ".found_helpful .found_helpful_no")),
        date: first_text(card, ".date_posted"),
        language: if language.is_empty() {
            "English".to_string()
        } else {
            language
        },
        playtime: parse_playtime(&first_text(card, ".hours_played")),
        is_early_access: exists(card, ".early_access_review"),
    })
}

/// Review cards on a `/reviews/` page. Cards missing an author or body are skipped.
pub fn parse_reviews(html: &str) -> Vec<Review> {
    let document = Html::parse_document(html);
    reviews_in(&document)
}

fn reviews_in(document: &Html) -> Vec<Review> {
    let Some(card_sel) = selector(".apphub_Card") else {
        return Vec::new();
    };
    document.select(&card_sel).filter_map(parse_review_card).collect()
}

/// Full reviews envelope for a page fetched at `offset` with `per_page` cards.
pub fn parse_review_page(html: &str, offset: u32, per_page: u32) -> ReviewPage {
    let document = Html::parse_document(html);
    let reviews = reviews_in(&document);
    let total_count = parse_total_count(&document);

    ReviewPage {
        success: true,
        reviews,
        total_count,
        has_more: has_more(offset, per_page, total_count),
        error: None,
    }
}
