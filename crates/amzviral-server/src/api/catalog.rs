use amzviral_core::{Category, CategoryInfo};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(in crate::api) struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

/// GET /api/categories
pub(in crate::api) async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: Category::ALL.into_iter().map(Category::info).collect(),
    })
}
