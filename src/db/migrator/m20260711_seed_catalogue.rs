use crate::entities::prelude::*;
use crate::entities::{ingredients, recipe_ingredients, recipes};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The catalogue is static: the application exposes no write surface for
/// recipes or ingredients, so the rows ship with the schema. Ids are explicit
/// because the link rows reference them.
const RECIPES: &[(i32, &str)] = &[
    (1, "Salad"),
    (2, "Fried Egg"),
    (3, "Omelet"),
    (4, "Pancakes"),
    (5, "Bread"),
    (6, "Pizza"),
    (7, "Spaghetti"),
    (8, "Vegetable Medley"),
    (9, "Cookie"),
];

const INGREDIENTS: &[(i32, &str)] = &[
    (1, "Lettuce"),
    (2, "Tomato"),
    (3, "Egg"),
    (4, "Milk"),
    (5, "Wheat Flour"),
    (6, "Sugar"),
    (7, "Cheese"),
    (8, "Beet"),
];

/// (recipe_id, ingredient_id)
const LINKS: &[(i32, i32)] = &[
    (1, 1), // Salad: Lettuce
    (1, 2), // Salad: Tomato
    (2, 3), // Fried Egg: Egg
    (3, 3), // Omelet: Egg
    (3, 4), // Omelet: Milk
    (4, 5), // Pancakes: Wheat Flour
    (4, 3), // Pancakes: Egg
    (5, 5), // Bread: Wheat Flour
    (6, 5), // Pizza: Wheat Flour
    (6, 2), // Pizza: Tomato
    (6, 7), // Pizza: Cheese
    (7, 5), // Spaghetti: Wheat Flour
    (7, 2), // Spaghetti: Tomato
    (8, 2), // Vegetable Medley: Tomato
    (8, 8), // Vegetable Medley: Beet
    (9, 5), // Cookie: Wheat Flour
    (9, 6), // Cookie: Sugar
    (9, 3), // Cookie: Egg
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert_recipes = sea_orm_migration::sea_query::Query::insert()
            .into_table(Recipes)
            .columns([recipes::Column::Id, recipes::Column::Name])
            .to_owned();
        for (id, name) in RECIPES {
            insert_recipes.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(insert_recipes).await?;

        let mut insert_ingredients = sea_orm_migration::sea_query::Query::insert()
            .into_table(Ingredients)
            .columns([ingredients::Column::Id, ingredients::Column::Name])
            .to_owned();
        for (id, name) in INGREDIENTS {
            insert_ingredients.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(insert_ingredients).await?;

        let mut insert_links = sea_orm_migration::sea_query::Query::insert()
            .into_table(RecipeIngredients)
            .columns([
                recipe_ingredients::Column::RecipeId,
                recipe_ingredients::Column::IngredientId,
            ])
            .to_owned();
        for (recipe_id, ingredient_id) in LINKS {
            insert_links.values_panic([(*recipe_id).into(), (*ingredient_id).into()]);
        }
        manager.exec_stmt(insert_links).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                sea_orm_migration::sea_query::Query::delete()
                    .from_table(RecipeIngredients)
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                sea_orm_migration::sea_query::Query::delete()
                    .from_table(Recipes)
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                sea_orm_migration::sea_query::Query::delete()
                    .from_table(Ingredients)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
