use chrono::{NaiveTime, Utc};
use uuid::Uuid;

use menupress::models::{Business, Product};
use menupress::services::menu::{
    self, DEFAULT_CATEGORY, OpenStatus, build_menu, category_label, group_into_sections,
};

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn product(name: &str, legacy_category: Option<&str>) -> Product {
    let now = Utc::now();

    Product {
        id: 1,
        business_id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{name} description"),
        price: 10.0,
        has_discount: false,
        discount_price: None,
        best_seller: false,
        category: legacy_category.map(str::to_string),
        category_id: None,
        category_name: None,
        image_url: None,
        active: true,
        deleted: false,
        created_at: now,
        edited_at: now,
    }
}

fn business(opens: Option<NaiveTime>, closes: Option<NaiveTime>) -> Business {
    let now = Utc::now();

    Business {
        id: Uuid::new_v4(),
        owner_user_id: Uuid::new_v4(),
        name: "Pollería Uripa".to_string(),
        slug: "polleria-uripa".to_string(),
        cover_url: None,
        profile_url: None,
        address: Some("Av. Principal 123".to_string()),
        opens_at: opens,
        closes_at: closes,
        created_at: now,
        edited_at: now,
    }
}

#[test]
fn overnight_window_wraps_midnight() {
    let opens = at(22, 0);
    let closes = at(2, 0);

    assert!(menu::is_open(opens, closes, at(23, 30)));
    assert!(menu::is_open(opens, closes, at(1, 0)));
    assert!(!menu::is_open(opens, closes, at(3, 0)));
    assert!(!menu::is_open(opens, closes, at(21, 59)));
}

#[test]
fn same_day_window_is_half_open() {
    let opens = at(8, 0);
    let closes = at(20, 0);

    // Inclusive at opening, exclusive at closing.
    assert!(menu::is_open(opens, closes, at(8, 0)));
    assert!(menu::is_open(opens, closes, at(19, 59)));
    assert!(!menu::is_open(opens, closes, at(20, 0)));
    assert!(!menu::is_open(opens, closes, at(7, 59)));
}

#[test]
fn seconds_are_ignored_in_the_window() {
    let opens = NaiveTime::from_hms_opt(8, 0, 45).expect("valid time");
    let closes = at(20, 0);
    let just_after_eight = NaiveTime::from_hms_opt(8, 0, 1).expect("valid time");

    assert!(menu::is_open(opens, closes, just_after_eight));
}

#[test]
fn legacy_tags_group_under_their_first_segment() {
    assert_eq!(category_label(None, Some("bebidas, postres")), "Bebidas");
    assert_eq!(category_label(None, Some("  parrillas ")), "Parrillas");
    assert_eq!(category_label(None, None), DEFAULT_CATEGORY);
    assert_eq!(category_label(None, Some("   ")), DEFAULT_CATEGORY);
}

#[test]
fn resolved_category_name_wins_over_legacy_tags() {
    assert_eq!(
        category_label(Some("menú criollo"), Some("bebidas, postres")),
        "Menú criollo"
    );
}

#[test]
fn sections_keep_first_seen_order() {
    let products = vec![
        product("Inca Kola", Some("bebidas")),
        product("Lomo saltado", Some("platos de fondo")),
        product("Chicha morada", Some("bebidas, frías")),
        product("Suspiro", None),
    ];

    let sections = group_into_sections(&products);
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();

    assert_eq!(titles, vec!["Bebidas", "Platos de fondo", "General"]);
    assert_eq!(sections[0].cards.len(), 2);
    assert_eq!(sections[0].cards[1].name, "Chicha morada");
}

#[test]
fn discounted_price_renders_both_amounts() {
    let mut p = product("Pollo entero", None);
    p.price = 10.0;
    p.has_discount = true;
    p.discount_price = Some(7.5);

    let sections = group_into_sections(&[p]);
    let card = &sections[0].cards[0];

    assert_eq!(card.original_price.as_deref(), Some("S/ 10.00"));
    assert_eq!(card.final_price, "S/ 7.50");
}

#[test]
fn discount_flag_off_hides_any_stored_discount() {
    let mut p = product("Pollo entero", None);
    p.price = 10.0;
    p.has_discount = false;
    p.discount_price = Some(7.5);

    let sections = group_into_sections(&[p]);
    let card = &sections[0].cards[0];

    assert_eq!(card.original_price, None);
    assert_eq!(card.final_price, "S/ 10.00");
}

#[test]
fn nonpositive_discount_is_not_rendered() {
    let mut p = product("Pollo entero", None);
    p.has_discount = true;
    p.discount_price = Some(0.0);

    let sections = group_into_sections(&[p]);
    let card = &sections[0].cards[0];

    assert_eq!(card.original_price, None);
    assert_eq!(card.final_price, "S/ 10.00");
}

#[test]
fn twelve_hour_labels() {
    assert_eq!(menu::format_time_12h(at(8, 0)), "8:00 AM");
    assert_eq!(menu::format_time_12h(at(20, 5)), "8:05 PM");
    assert_eq!(menu::format_time_12h(at(0, 30)), "12:30 AM");
    assert_eq!(menu::format_time_12h(at(12, 0)), "12:00 PM");
}

#[test]
fn menu_without_stored_hours_has_no_status() {
    let view = build_menu(&business(None, None), &[], at(12, 0));

    assert_eq!(view.hours_label, None);
    assert!(view.status.is_none());
    assert!(view.sections.is_empty());
}

#[test]
fn menu_with_hours_reports_status_and_label() {
    let b = business(Some(at(8, 0)), Some(at(20, 0)));

    let open_view = build_menu(&b, &[], at(12, 0));
    assert_eq!(open_view.hours_label.as_deref(), Some("8:00 AM - 8:00 PM"));
    assert_eq!(open_view.status, Some(OpenStatus::Open));

    let closed_view = build_menu(&b, &[], at(21, 0));
    assert_eq!(closed_view.status, Some(OpenStatus::Closed));
}
