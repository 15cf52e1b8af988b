use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::entity::jewellery;
use crate::models::jewellery::TagList;

struct DemoItem {
    image_url: &'static str,
    category: &'static str,
    style: &'static [&'static str],
    outfit_type: &'static [&'static str],
    occasion: &'static [&'static str],
    primary_colors: &'static [&'static str],
    secondary_colors: &'static [&'static str],
    material: &'static str,
    notes: &'static str,
}

const DEMO_ITEMS: &[DemoItem] = &[
    DemoItem {
        image_url: "https://example.com/temple-necklace.jpg",
        category: "necklace",
        style: &["traditional"],
        outfit_type: &["saree", "lehenga"],
        occasion: &["wedding", "festive"],
        primary_colors: &["gold"],
        secondary_colors: &["red"],
        material: "gold",
        notes: "Bridal temple necklace",
    },
    DemoItem {
        image_url: "https://example.com/choker.jpg",
        category: "necklace",
        style: &["modern"],
        outfit_type: &["gown"],
        occasion: &["party"],
        primary_colors: &["silver"],
        secondary_colors: &["white"],
        material: "silver",
        notes: "Minimal choker",
    },
    DemoItem {
        image_url: "https://example.com/jhumka.jpg",
        category: "earrings",
        style: &["traditional"],
        outfit_type: &["saree", "kurti"],
        occasion: &["festive"],
        primary_colors: &["gold"],
        secondary_colors: &["green"],
        material: "gold",
        notes: "Antique jhumkas",
    },
    DemoItem {
        image_url: "https://example.com/bangles.jpg",
        category: "bangles",
        style: &["traditional"],
        outfit_type: &["saree"],
        occasion: &["wedding"],
        primary_colors: &["gold"],
        secondary_colors: &["red"],
        material: "gold",
        notes: "Bridal bangles set",
    },
];

fn tags(values: &[&str]) -> serde_json::Value {
    TagList::new(values.iter().copied().map(String::from).collect()).to_json()
}

impl DemoItem {
    fn to_active_model(&self) -> jewellery::ActiveModel {
        jewellery::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(None),
            image_url: Set(String::from(self.image_url)),
            category: Set(String::from(self.category)),
            style: Set(tags(self.style)),
            outfit_type: Set(tags(self.outfit_type)),
            occasion: Set(tags(self.occasion)),
            primary_colors: Set(tags(self.primary_colors)),
            secondary_colors: Set(tags(self.secondary_colors)),
            material: Set(Some(String::from(self.material))),
            notes: Set(Some(String::from(self.notes))),
            created_at: Set(chrono::Utc::now()),
        }
    }
}

/// Insert the demo catalog. Does nothing when the table already has rows.
pub async fn seed_jewellery(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = jewellery::Entity::find().count(db).await?;
    if existing > 0 {
        info!(existing, "Catalog not empty, skipping demo seed");
        return Ok(());
    }

    jewellery::Entity::insert_many(DEMO_ITEMS.iter().map(DemoItem::to_active_model))
        .exec_without_returning(db)
        .await?;

    info!("Seeded {} demo jewellery items", DEMO_ITEMS.len());
    Ok(())
}

/// GIN indexes backing the `@>` tag filters.
const TAG_INDEXES: &[(&str, &str)] = &[
    ("idx_jewellery_occasion", "occasion"),
    ("idx_jewellery_outfit_type", "outfit_type"),
    ("idx_jewellery_primary_colors", "primary_colors"),
    ("idx_jewellery_secondary_colors", "secondary_colors"),
];

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't create GIN indexes, so they are created
/// manually on startup. Failures are logged and do not abort startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    for &(name, column) in TAG_INDEXES {
        let stmt = format!(
            "CREATE INDEX IF NOT EXISTS \"{name}\" ON \"jewellery\" USING GIN (\"{column}\" jsonb_path_ops)"
        );
        report_index(name, db.execute_unprepared(&stmt).await.map(|_| ()));
    }

    // Listing order
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_jewellery_created_at")
        .table(jewellery::Entity)
        .col(jewellery::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);
    report_index(
        "idx_jewellery_created_at",
        db.execute_unprepared(&stmt).await.map(|_| ()),
    );

    Ok(())
}

fn report_index(name: &str, result: Result<(), DbErr>) {
    match result {
        Ok(()) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}
