pub mod prelude;

pub mod accounts;
pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipe_status;
pub mod recipes;
