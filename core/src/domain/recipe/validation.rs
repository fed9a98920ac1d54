use std::borrow::Cow;

use validator::ValidationError;

use crate::domain::recipe::{
    entities::{Amount, Ingredient},
    units::is_known_unit,
};

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn not_blank(
    value: &str,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid(code, message));
    }
    Ok(())
}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    not_blank(title, "title_required", "title is required")
}

pub(crate) fn validate_description(description: &str) -> Result<(), ValidationError> {
    not_blank(description, "description_required", "description is required")
}

fn validate_amount(amount: &Amount) -> Result<(), ValidationError> {
    if amount.is_empty() {
        return Err(invalid(
            "amount_required",
            "every ingredient needs a name and an amount",
        ));
    }

    if let Some(value) = amount.numeric_value()
        && value < 0.0
    {
        return Err(invalid(
            "amount_negative",
            "ingredient amounts must not be negative",
        ));
    }

    Ok(())
}

fn validate_ingredient(ingredient: &Ingredient) -> Result<(), ValidationError> {
    if ingredient.name.trim().is_empty() {
        return Err(invalid(
            "ingredient_name_required",
            "every ingredient needs a name and an amount",
        ));
    }

    validate_amount(&ingredient.amount)?;

    if !is_known_unit(&ingredient.unit) {
        return Err(invalid("unit_unknown", "unknown measurement unit"));
    }

    Ok(())
}

#[allow(clippy::ptr_arg)]
pub(crate) fn validate_ingredients(ingredients: &Vec<Ingredient>) -> Result<(), ValidationError> {
    if ingredients.is_empty() {
        return Err(invalid(
            "ingredients_required",
            "at least one ingredient is required",
        ));
    }

    ingredients.iter().try_for_each(validate_ingredient)
}

#[allow(clippy::ptr_arg)]
pub(crate) fn validate_steps(steps: &Vec<String>) -> Result<(), ValidationError> {
    if steps.is_empty() {
        return Err(invalid("steps_required", "at least one step is required"));
    }

    if steps.iter().any(|step| step.trim().is_empty()) {
        return Err(invalid("step_blank", "steps must not be blank"));
    }

    Ok(())
}
