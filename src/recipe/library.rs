use super::definition::Recipe;
use crate::error::RecipeError;

const BUILTIN_RECIPES: &str = include_str!("../../assets/recipes.yaml");

/// An ordered collection of recipes, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct RecipeLibrary {
    recipes: Vec<Recipe>,
}

impl RecipeLibrary {
    /// The recipes bundled with the crate.
    pub fn builtin() -> Result<Self, RecipeError> {
        Self::from_yaml_str(BUILTIN_RECIPES)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, RecipeError> {
        let recipes: Vec<Recipe> =
            serde_yaml::from_str(content).map_err(|e| RecipeError::Parse(e.to_string()))?;
        Ok(Self { recipes })
    }

    pub fn get(&self, id: &str) -> Result<&Recipe, RecipeError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RecipeError::UnknownRecipe(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
