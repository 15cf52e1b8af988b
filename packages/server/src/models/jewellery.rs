use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::entity::jewellery;
use crate::error::AppError;

use super::shared::double_option;

/// An unordered collection of short controlled-vocabulary tags.
///
/// Persisted as a JSON string array. Conversion to and from JSON happens
/// only at the entity boundary; over HTTP it is a plain array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    /// Reads a stored column value. `null` and non-arrays read as empty;
    /// non-string elements are dropped.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value.as_array() {
            Some(items) => Self(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            None => Self::default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self.0.clone())
    }
}

/// Null and absent lists both normalize to the empty list.
impl From<Option<Vec<String>>> for TagList {
    fn from(tags: Option<Vec<String>>) -> Self {
        Self(tags.unwrap_or_default())
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateJewelleryRequest {
    #[schema(example = "Temple necklace")]
    pub name: Option<String>,
    /// Absolute http(s) URL of the stored image.
    #[schema(value_type = String, example = "https://example.com/temple-necklace.jpg")]
    pub image_url: Url,
    #[schema(example = "necklace")]
    pub category: String,
    #[schema(example = json!(["traditional"]))]
    pub style: Option<Vec<String>>,
    #[schema(example = json!(["saree", "lehenga"]))]
    pub outfit_type: Option<Vec<String>>,
    #[schema(example = json!(["wedding", "festive"]))]
    pub occasion: Option<Vec<String>>,
    #[schema(example = json!(["gold"]))]
    pub primary_colors: Option<Vec<String>>,
    #[schema(example = json!(["red"]))]
    pub secondary_colors: Option<Vec<String>>,
    #[schema(example = "gold")]
    pub material: Option<String>,
    #[schema(example = "Bridal temple necklace")]
    pub notes: Option<String>,
}

impl CreateJewelleryRequest {
    /// Build the row to insert. The server assigns `id` and `created_at`.
    pub fn into_active_model(self, id: Uuid, created_at: DateTime<Utc>) -> jewellery::ActiveModel {
        jewellery::ActiveModel {
            id: Set(id),
            name: Set(self.name),
            image_url: Set(String::from(self.image_url)),
            category: Set(self.category.trim().to_string()),
            style: Set(TagList::from(self.style).to_json()),
            outfit_type: Set(TagList::from(self.outfit_type).to_json()),
            occasion: Set(TagList::from(self.occasion).to_json()),
            primary_colors: Set(TagList::from(self.primary_colors).to_json()),
            secondary_colors: Set(TagList::from(self.secondary_colors).to_json()),
            material: Set(self.material),
            notes: Set(self.notes),
            created_at: Set(created_at),
        }
    }
}

/// Sparse change-mapping for a jewellery item.
///
/// Every field is tri-state: absent (leave untouched), `null`, or a value.
/// `id` and `created_at` are not part of the mapping; if a client sends them
/// they are ignored.
#[derive(Deserialize, Default, PartialEq, Debug, utoipa::ToSchema)]
pub struct UpdateJewelleryRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    /// Absolute http(s) URL. Must not be null.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<Url>>,
    /// Must not be null.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    /// `null` clears the list.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub style: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub outfit_type: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub occasion: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub primary_colors: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub secondary_colors: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub material: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl UpdateJewelleryRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite exactly the provided fields on `active`.
    ///
    /// Fields absent from the mapping keep their current `ActiveValue`, so
    /// the resulting UPDATE only touches columns the caller named.
    pub fn apply(self, active: &mut jewellery::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(Some(image_url)) = self.image_url {
            active.image_url = Set(String::from(image_url));
        }
        if let Some(Some(category)) = self.category {
            active.category = Set(category.trim().to_string());
        }
        if let Some(style) = self.style {
            active.style = Set(TagList::from(style).to_json());
        }
        if let Some(outfit_type) = self.outfit_type {
            active.outfit_type = Set(TagList::from(outfit_type).to_json());
        }
        if let Some(occasion) = self.occasion {
            active.occasion = Set(TagList::from(occasion).to_json());
        }
        if let Some(primary_colors) = self.primary_colors {
            active.primary_colors = Set(TagList::from(primary_colors).to_json());
        }
        if let Some(secondary_colors) = self.secondary_colors {
            active.secondary_colors = Set(TagList::from(secondary_colors).to_json());
        }
        if let Some(material) = self.material {
            active.material = Set(material);
        }
        if let Some(notes) = self.notes {
            active.notes = Set(notes);
        }
    }
}

/// Optional listing filters. Every supplied filter must match.
#[derive(Deserialize, Default, Debug, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JewelleryListQuery {
    /// Case-insensitive substring of the category.
    pub category: Option<String>,
    /// Exact element of the `occasion` tags.
    pub occasion: Option<String>,
    /// Exact element of the `outfit_type` tags.
    pub outfit_type: Option<String>,
    /// Exact element of `primary_colors` or `secondary_colors`.
    pub color: Option<String>,
    /// Case-insensitive substring of category, material or notes.
    pub search: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, utoipa::ToSchema)]
pub struct JewelleryResponse {
    pub id: Uuid,
    pub name: Option<String>,
    #[schema(example = "https://example.com/temple-necklace.jpg")]
    pub image_url: String,
    #[schema(example = "necklace")]
    pub category: String,
    #[schema(value_type = Vec<String>)]
    pub style: TagList,
    #[schema(value_type = Vec<String>)]
    pub outfit_type: TagList,
    #[schema(value_type = Vec<String>)]
    pub occasion: TagList,
    #[schema(value_type = Vec<String>)]
    pub primary_colors: TagList,
    #[schema(value_type = Vec<String>)]
    pub secondary_colors: TagList,
    pub material: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<jewellery::Model> for JewelleryResponse {
    fn from(m: jewellery::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            image_url: m.image_url,
            category: m.category,
            style: TagList::from_json(&m.style),
            outfit_type: TagList::from_json(&m.outfit_type),
            occasion: TagList::from_json(&m.occasion),
            primary_colors: TagList::from_json(&m.primary_colors),
            secondary_colors: TagList::from_json(&m.secondary_colors),
            material: m.material,
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}

fn validate_category(category: &str) -> Result<(), AppError> {
    if category.trim().is_empty() {
        return Err(AppError::Validation("Category must not be blank".into()));
    }
    Ok(())
}

fn validate_image_url(url: &Url) -> Result<(), AppError> {
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(AppError::Validation(
            "image_url must be an absolute http(s) URL".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_jewellery(req: &CreateJewelleryRequest) -> Result<(), AppError> {
    validate_image_url(&req.image_url)?;
    validate_category(&req.category)
}

pub fn validate_update_jewellery(req: &UpdateJewelleryRequest) -> Result<(), AppError> {
    match &req.image_url {
        Some(None) => {
            return Err(AppError::Validation("image_url cannot be null".into()));
        }
        Some(Some(url)) => validate_image_url(url)?,
        None => {}
    }
    match &req.category {
        Some(None) => {
            return Err(AppError::Validation("category cannot be null".into()));
        }
        Some(Some(category)) => validate_category(category)?,
        None => {}
    }
    Ok(())
}
