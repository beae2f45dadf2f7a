use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A menu item. Every read joins `categories` so `category_name` carries
/// the resolved name of `category_id`; the `category` column is the
/// legacy comma-joined tag list and is never written by this code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub business_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub has_discount: bool,
    pub discount_price: Option<f64>,
    pub best_seller: bool,
    pub category: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    /// Shown on the public menu only when set.
    pub active: bool,
    /// Soft delete. A deleted product must never appear in any listing.
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

/// Raw form values, before validation. Prices arrive already parsed:
/// `None` means the field was empty or not numeric.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub has_discount: bool,
    pub discount_price: Option<f64>,
    pub best_seller: bool,
    pub category_id: Option<i64>,
}

/// The validated field set shared by create and update. Deliberately has
/// no `active`/`deleted` members: an edit can never touch moderation
/// state.
#[derive(Debug, Clone, Serialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub has_discount: bool,
    pub discount_price: Option<f64>,
    pub best_seller: bool,
    pub category_id: Option<i64>,
}

impl ProductDraft {
    /// Checks run in a fixed order and short-circuit: required fields,
    /// then the discount price, then the image requirement for new
    /// products. Nothing may hit the database before this passes.
    pub fn validate(self, is_new: bool, has_image: bool) -> Result<ProductFields, String> {
        let name = self.name.trim().to_string();
        let description = self.description.trim().to_string();

        let price = match self.price {
            Some(p) => p,
            None => return Err(MSG_REQUIRED_FIELDS.to_string()),
        };
        if name.is_empty() || description.is_empty() {
            return Err(MSG_REQUIRED_FIELDS.to_string());
        }

        let discount_price = if self.has_discount {
            match self.discount_price {
                Some(p) if p > 0.0 => Some(p),
                _ => return Err(MSG_DISCOUNT_PRICE.to_string()),
            }
        } else {
            None
        };

        if is_new && !has_image {
            return Err(MSG_IMAGE_REQUIRED.to_string());
        }

        Ok(ProductFields {
            name,
            description,
            price,
            has_discount: self.has_discount,
            discount_price,
            best_seller: self.best_seller,
            category_id: self.category_id,
        })
    }
}

pub const MSG_REQUIRED_FIELDS: &str = "Nombre, descripción y precio son obligatorios.";
pub const MSG_DISCOUNT_PRICE: &str =
    "Si tiene descuento, debes ingresar el precio con descuento.";
pub const MSG_IMAGE_REQUIRED: &str = "Debes subir una imagen para el producto nuevo.";

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Pollo a la brasa".to_string(),
            description: "1/4 de pollo con papas".to_string(),
            price: Some(25.0),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn accepts_a_complete_draft() {
        let fields = valid_draft().validate(true, true).expect("should validate");
        assert_eq!(fields.name, "Pollo a la brasa");
        assert_eq!(fields.price, 25.0);
        assert_eq!(fields.discount_price, None);
    }

    #[test]
    fn rejects_empty_description_before_anything_else() {
        let draft = ProductDraft {
            description: "   ".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            draft.validate(true, false).unwrap_err(),
            MSG_REQUIRED_FIELDS
        );
    }

    #[test]
    fn rejects_missing_price() {
        let draft = ProductDraft {
            price: None,
            ..valid_draft()
        };
        assert_eq!(
            draft.validate(false, false).unwrap_err(),
            MSG_REQUIRED_FIELDS
        );
    }

    #[test]
    fn discount_needs_a_positive_discount_price() {
        let flagged = ProductDraft {
            has_discount: true,
            discount_price: None,
            ..valid_draft()
        };
        assert_eq!(flagged.validate(true, true).unwrap_err(), MSG_DISCOUNT_PRICE);

        let nonpositive = ProductDraft {
            has_discount: true,
            discount_price: Some(0.0),
            ..valid_draft()
        };
        assert_eq!(
            nonpositive.validate(true, true).unwrap_err(),
            MSG_DISCOUNT_PRICE
        );
    }

    #[test]
    fn discount_price_is_dropped_when_flag_is_off() {
        let draft = ProductDraft {
            has_discount: false,
            discount_price: Some(7.5),
            ..valid_draft()
        };
        let fields = draft.validate(false, false).expect("should validate");
        assert_eq!(fields.discount_price, None);
    }

    #[test]
    fn new_product_requires_an_image() {
        assert_eq!(
            valid_draft().validate(true, false).unwrap_err(),
            MSG_IMAGE_REQUIRED
        );
        // Editing an existing product does not.
        assert!(valid_draft().validate(false, false).is_ok());
    }

    #[test]
    fn trims_name_and_description() {
        let draft = ProductDraft {
            name: "  Anticuchos ".to_string(),
            description: " Corazón a la parrilla ".to_string(),
            ..valid_draft()
        };
        let fields = draft.validate(false, false).expect("should validate");
        assert_eq!(fields.name, "Anticuchos");
        assert_eq!(fields.description, "Corazón a la parrilla");
    }
}
