use askama::Template;

use menupress::models::{Category, Product};
use menupress::services::menu::{self, MenuView};

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/products.html")]
pub struct AdminProductsTemplate {
    pub user_email: String,
    pub has_business: bool,
    /// Pre-rendered [`ProductsTableTemplate`], also served standalone to
    /// htmx swaps.
    pub table_html: String,
}

#[derive(Template)]
#[template(path = "admin/products_table.html")]
pub struct ProductsTableTemplate {
    pub rows: Vec<ProductRow>,
    pub error: Option<String>,
}

pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_label: String,
    pub image_url: Option<String>,
    pub active: bool,
}

impl ProductRow {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price_label: menu::format_price(product.price),
            image_url: product.image_url.clone(),
            active: product.active,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub user_email: String,
    pub heading: String,
    pub action: String,
    pub is_new: bool,
    pub error: Option<String>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub has_discount: bool,
    pub discount_price: String,
    pub best_seller: bool,
    pub image_url: Option<String>,
    pub categories: Vec<CategoryOption>,
}

pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

pub fn category_options(categories: &[Category], selected: Option<i64>) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id,
            name: c.name.clone(),
            selected: selected == Some(c.id),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "admin/categories.html")]
pub struct AdminCategoriesTemplate {
    pub user_email: String,
    pub has_business: bool,
    pub error: Option<String>,
    pub table_html: String,
}

#[derive(Template)]
#[template(path = "admin/categories_table.html")]
pub struct CategoriesTableTemplate {
    pub categories: Vec<Category>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "public/menu.html")]
pub struct PublicMenuTemplate {
    pub view: MenuView,
}

#[derive(Template)]
#[template(path = "public/menu_missing.html")]
pub struct MenuMissingTemplate;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;
