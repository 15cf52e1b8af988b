use sea_orm::prelude::Expr;
use sea_orm::sea_query::extension::postgres::{PgBinOper, PgExpr};
use sea_orm::sea_query::{ExprTrait, LikeExpr, SimpleExpr};
use sea_orm::Condition;

use crate::entity::jewellery::Column;
use crate::models::jewellery::JewelleryListQuery;
use crate::models::shared::escape_like;

/// Build the listing predicate: an AND across supplied filters, with the
/// `color` and `search` filters each an OR of their sub-conditions.
///
/// Empty-string parameters are treated as omitted. With no filters the
/// condition is empty and matches every row.
pub fn jewellery_condition(query: &JewelleryListQuery) -> Condition {
    let mut cond = Condition::all();

    if let Some(category) = supplied(&query.category) {
        cond = cond.add(contains_ci(Column::Category, category));
    }

    if let Some(occasion) = supplied(&query.occasion) {
        cond = cond.add(has_tag(Column::Occasion, occasion));
    }

    if let Some(outfit_type) = supplied(&query.outfit_type) {
        cond = cond.add(has_tag(Column::OutfitType, outfit_type));
    }

    if let Some(color) = supplied(&query.color) {
        cond = cond.add(
            Condition::any()
                .add(has_tag(Column::PrimaryColors, color))
                .add(has_tag(Column::SecondaryColors, color)),
        );
    }

    if let Some(search) = supplied(&query.search) {
        // NULL material/notes make their ILIKE NULL, which OR treats as false.
        cond = cond.add(
            Condition::any()
                .add(contains_ci(Column::Category, search))
                .add(contains_ci(Column::Material, search))
                .add(contains_ci(Column::Notes, search)),
        );
    }

    cond
}

fn supplied(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|s| !s.is_empty())
}

/// `col ILIKE '%term%'` with wildcards in `term` matched literally.
/// Case folding happens entirely in Postgres, so both sides fold alike.
fn contains_ci(col: Column, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(term));
    Expr::col(col).ilike(LikeExpr::new(pattern).escape('\\'))
}

/// `col @> '["tag"]'`: the JSON array column contains `tag` as an element.
fn has_tag(col: Column, tag: &str) -> SimpleExpr {
    Expr::col(col).binary(
        PgBinOper::Contains,
        Expr::val(serde_json::Value::from(vec![tag.to_string()])),
    )
}
