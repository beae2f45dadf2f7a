use actix_multipart::{Multipart, MultipartError};
use futures_util::TryStreamExt;
use serde::Deserialize;

use menupress::models::ProductDraft;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoriesQuery {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoryCreateForm {
    pub name: String,
}

/// Checkboxes post their value when checked and nothing when unchecked.
#[derive(Deserialize)]
pub struct ProductToggleForm {
    pub active: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoryToggleForm {
    pub visible: Option<String>,
}

pub fn checkbox_is_on(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("on"))
}

pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// The product form arrives as multipart because of the image field.
/// Text values are kept raw here; parsing/validation happens in
/// [`ProductDraft::validate`].
#[derive(Default)]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub price_raw: String,
    pub has_discount: bool,
    pub discount_price_raw: String,
    pub best_seller: bool,
    pub category_id: Option<i64>,
    pub image: Option<UploadedImage>,
}

impl ProductFormData {
    pub async fn from_multipart(payload: &mut Multipart) -> Result<Self, MultipartError> {
        let mut data = Self::default();

        while let Some(mut field) = payload.try_next().await? {
            let name = field
                .content_disposition()
                .get_name()
                .unwrap_or_default()
                .to_string();

            if name == "image" {
                let content_type = field.content_type().map(|m| m.essence_str().to_string());
                let bytes = read_field_bytes(&mut field).await?;

                // An empty file part just means "no new image".
                if !bytes.is_empty() {
                    data.image = Some(UploadedImage {
                        bytes,
                        content_type,
                    });
                }
                continue;
            }

            let bytes = read_field_bytes(&mut field).await?;
            let value = String::from_utf8_lossy(&bytes).trim().to_string();

            match name.as_str() {
                "name" => data.name = value,
                "description" => data.description = value,
                "price" => data.price_raw = value,
                "has_discount" => data.has_discount = checkbox_is_on(Some(value.as_str())),
                "discount_price" => data.discount_price_raw = value,
                "best_seller" => data.best_seller = checkbox_is_on(Some(value.as_str())),
                "category_id" => data.category_id = value.parse().ok(),
                _ => {}
            }
        }

        Ok(data)
    }

    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: parse_price(&self.price_raw),
            has_discount: self.has_discount,
            discount_price: parse_price(&self.discount_price_raw),
            best_seller: self.best_seller,
            category_id: self.category_id,
        }
    }
}

async fn read_field_bytes(
    field: &mut actix_multipart::Field,
) -> Result<Vec<u8>, MultipartError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_parse_or_become_none() {
        assert_eq!(parse_price("10.50"), Some(10.5));
        assert_eq!(parse_price(" 7 "), Some(7.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("NaN"), None);
    }

    #[test]
    fn checkbox_values() {
        assert!(checkbox_is_on(Some("true")));
        assert!(checkbox_is_on(Some("on")));
        assert!(!checkbox_is_on(Some("false")));
        assert!(!checkbox_is_on(None));
    }
}
