use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder};

use crate::entities::{ingredients, prelude::*, recipes};

/// Separator used when flattening a recipe's ingredient names for display.
const INGREDIENT_SEPARATOR: &str = ", ";

/// Detail-view projection: the recipe plus its ingredient names flattened
/// into one display string ("Lettuce, Tomato"), ordered by ingredient id.
#[derive(Debug, Clone)]
pub struct RecipeWithIngredients {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All recipes in stable id order (the catalogue is small and static).
    pub async fn list_all(&self) -> Result<Vec<recipes::Model>> {
        let rows = Recipes::find()
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list recipes")?;

        Ok(rows)
    }

    /// Get recipe by ID
    pub async fn get(&self, id: i32) -> Result<Option<recipes::Model>> {
        let recipe = Recipes::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query recipe by ID")?;

        Ok(recipe)
    }

    /// Recipe by id with its ingredient names aggregated into a single
    /// delimited list. Returns `Ok(None)` when the recipe does not exist.
    pub async fn get_with_ingredients(&self, id: i32) -> Result<Option<RecipeWithIngredients>> {
        let Some(recipe) = self.get(id).await? else {
            return Ok(None);
        };

        let linked = recipe
            .find_related(Ingredients)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query ingredients for recipe")?;

        let names: Vec<String> = linked.into_iter().map(|i| i.name).collect();

        Ok(Some(RecipeWithIngredients {
            id: recipe.id,
            name: recipe.name,
            ingredients: names.join(INGREDIENT_SEPARATOR),
        }))
    }
}
