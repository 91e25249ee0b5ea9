//! Donation intake validation.
//!
//! Turns a submitted intake form into a `DonationDraft`. The store trusts
//! whatever it is given, so every acceptance rule lives here.

use shared::{CreateDonationRequest, DonationCondition};

use super::models::DonationDraft;

pub const MAX_IMAGES: usize = 5;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields (missing: {0})")]
    MissingField(&'static str),
    #[error("Please upload at least one photo of the clothing item")]
    NoImages,
    #[error("You can upload maximum 5 images, got {0}")]
    TooManyImages(usize),
    #[error("{file_name} is larger than 5MB")]
    ImageTooLarge { file_name: String, size_bytes: u64 },
    #[error("We only accept clothing in Good or Acceptable condition")]
    ConditionNotAccepted,
    #[error("Quantity must be a positive whole number, got '{0}'")]
    InvalidQuantity(String),
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn quantity(value: &Option<String>) -> Result<String, ValidationError> {
    match optional(value) {
        None => Ok("1".to_string()),
        Some(raw) => match raw.parse::<u32>() {
            Ok(count) if count > 0 => Ok(count.to_string()),
            _ => Err(ValidationError::InvalidQuantity(raw)),
        },
    }
}

/// Check an intake form and produce the draft to hand to the store
pub fn validate_donation_request(request: &CreateDonationRequest) -> Result<DonationDraft, ValidationError> {
    let title = required(&request.title, "title")?;
    let description = required(&request.description, "description")?;
    let condition = request
        .condition
        .ok_or(ValidationError::MissingField("condition"))?;
    let size = required(&request.size, "size")?;

    if request.images.is_empty() {
        return Err(ValidationError::NoImages);
    }
    if let Some(image) = request.images.iter().find(|i| i.size_bytes > MAX_IMAGE_BYTES) {
        return Err(ValidationError::ImageTooLarge {
            file_name: image.file_name.clone(),
            size_bytes: image.size_bytes,
        });
    }
    if request.images.len() > MAX_IMAGES {
        return Err(ValidationError::TooManyImages(request.images.len()));
    }

    if condition == DonationCondition::Poor {
        return Err(ValidationError::ConditionNotAccepted);
    }

    Ok(DonationDraft {
        title,
        description,
        condition,
        size,
        gender: optional(&request.gender),
        quantity: quantity(&request.quantity)?,
        category: optional(&request.category),
        pickup_address: optional(&request.pickup_address),
        phone: optional(&request.phone),
        notes: optional(&request.notes),
        available_times: optional(&request.available_times),
        image_preview_urls: request
            .images
            .iter()
            .map(|image| image.preview_url.clone())
            .collect(),
    })
}
