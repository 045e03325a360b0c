pub use super::accounts::Entity as Accounts;
pub use super::ingredients::Entity as Ingredients;
pub use super::recipe_ingredients::Entity as RecipeIngredients;
pub use super::recipe_status::Entity as RecipeStatus;
pub use super::recipes::Entity as Recipes;
