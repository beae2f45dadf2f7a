//! Builds the public menu view: category grouping, the open/closed
//! window, and price formatting. Everything here is pure so it can be
//! exercised without a server or a database.

use chrono::{NaiveTime, Timelike};

use std::collections::HashMap;

use crate::models::{Business, Product};

/// Label for products that carry no category information at all.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug)]
pub struct MenuView {
    pub name: String,
    pub cover_url: Option<String>,
    pub profile_url: Option<String>,
    pub address: Option<String>,
    /// "8:00 AM - 8:00 PM"; absent unless both times are stored.
    pub hours_label: Option<String>,
    pub status: Option<OpenStatus>,
    pub sections: Vec<MenuSection>,
}

#[derive(Debug)]
pub struct MenuSection {
    pub title: String,
    pub cards: Vec<ProductCard>,
}

#[derive(Debug)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub best_seller: bool,
    /// Struck-through base price, present only when a discount applies.
    pub original_price: Option<String>,
    pub final_price: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    Open,
    Closed,
}

impl OpenStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OpenStatus::Open => "Abierto",
            OpenStatus::Closed => "Cerrado",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            OpenStatus::Open => "status-open",
            OpenStatus::Closed => "status-closed",
        }
    }
}

/// Whether `now` falls inside the business hours. All three times reduce
/// to minutes since midnight (seconds are ignored). The interval is
/// half-open: inclusive at opening, exclusive at closing. A closing time
/// before the opening time means the window spans midnight.
pub fn is_open(opens_at: NaiveTime, closes_at: NaiveTime, now: NaiveTime) -> bool {
    let open = minutes_of(opens_at);
    let close = minutes_of(closes_at);
    let now = minutes_of(now);

    if close < open {
        // e.g. 22:00 - 02:00
        now >= open || now < close
    } else {
        now >= open && now < close
    }
}

fn minutes_of(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

pub fn format_price(value: f64) -> String {
    format!("S/ {value:.2}")
}

/// 12-hour rendering for the header line, "8:00 PM".
pub fn format_time_12h(t: NaiveTime) -> String {
    let suffix = if t.hour() >= 12 { "PM" } else { "AM" };
    let hour12 = match t.hour() % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{:02} {}", hour12, t.minute(), suffix)
}

/// Grouping label for a product. The resolved category name wins; the
/// fallback is the first comma-separated segment of the legacy tag list,
/// trimmed and capitalized; with neither, [`DEFAULT_CATEGORY`].
pub fn category_label(category_name: Option<&str>, legacy_tags: Option<&str>) -> String {
    if let Some(name) = category_name.map(str::trim).filter(|s| !s.is_empty()) {
        return capitalize_first(name);
    }

    let first_tag = legacy_tags
        .and_then(|tags| tags.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match first_tag {
        Some(tag) => capitalize_first(tag),
        None => DEFAULT_CATEGORY.to_string(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl ProductCard {
    fn from_product(product: &Product) -> Self {
        // A discount only renders when the flag is set AND the stored
        // value is positive; legacy rows can carry junk in either field.
        let discounted = product
            .discount_price
            .filter(|_| product.has_discount)
            .filter(|p| *p > 0.0);

        let (original_price, final_price) = match discounted {
            Some(d) => (Some(format_price(product.price)), format_price(d)),
            None => (None, format_price(product.price)),
        };

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            best_seller: product.best_seller,
            original_price,
            final_price,
        }
    }
}

/// Sections appear in the order their label is first seen while walking
/// the (category-sorted) product list.
pub fn group_into_sections(products: &[Product]) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    let mut by_label: HashMap<String, usize> = HashMap::new();

    for product in products {
        let label = category_label(product.category_name.as_deref(), product.category.as_deref());
        let card = ProductCard::from_product(product);

        match by_label.get(&label) {
            Some(&i) => sections[i].cards.push(card),
            None => {
                by_label.insert(label.clone(), sections.len());
                sections.push(MenuSection {
                    title: label,
                    cards: vec![card],
                });
            }
        }
    }

    sections
}

/// Assembles the whole page model from already-fetched rows and a clock
/// reading.
pub fn build_menu(business: &Business, products: &[Product], now: NaiveTime) -> MenuView {
    let window = business.opens_at.zip(business.closes_at);

    MenuView {
        name: business.name.clone(),
        cover_url: business.cover_url.clone(),
        profile_url: business.profile_url.clone(),
        address: business.address.clone(),
        hours_label: window.map(|(opens, closes)| {
            format!("{} - {}", format_time_12h(opens), format_time_12h(closes))
        }),
        status: window.map(|(opens, closes)| {
            if is_open(opens, closes, now) {
                OpenStatus::Open
            } else {
                OpenStatus::Closed
            }
        }),
        sections: group_into_sections(products),
    }
}
