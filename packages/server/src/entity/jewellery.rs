use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jewellery")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: Option<String>,

    /// Absolute URL in canonical string form.
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    pub category: String,

    // Tag lists: JSON arrays of strings, never NULL.
    #[sea_orm(column_type = "JsonBinary")]
    pub style: serde_json::Value,
    #[sea_orm(column_type = "JsonBinary")]
    pub outfit_type: serde_json::Value,
    #[sea_orm(column_type = "JsonBinary")]
    pub occasion: serde_json::Value,
    #[sea_orm(column_type = "JsonBinary")]
    pub primary_colors: serde_json::Value,
    #[sea_orm(column_type = "JsonBinary")]
    pub secondary_colors: serde_json::Value,

    pub material: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
