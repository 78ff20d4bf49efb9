//! Pet photo classification.

use petassist_core::{ImageInput, PetImageAnalysis, PromptMessage, RuntimeError, parse_classification};
use tracing::debug;

use super::PromptSessionHandle;

/// Instruction sent alongside the photo.
///
/// The model is asked for minified JSON over a fixed schema; whatever comes
/// back is run through [`parse_classification`].
pub const CLASSIFICATION_INSTRUCTION: &str = "You are a precise image classifier. \
Identify if the image shows a cat or a dog and infer the likely breed, gender, age and a fitting name, \
providing a description of the pet. The description must be based on the pet in the image \
(omit age and breed from the description). \
Respond ONLY with minified JSON with keys: animal ('cat'|'dog'|'unknown'), breed (string), \
gender (string), age ({\"years\": integer, \"months\": integer 0-11}), name (string), \
description (string), confidence (0..1). No extra text.";

/// Classify a pet photo.
///
/// Transport and model errors propagate; unusable model output never does,
/// it becomes an `unknown` analysis carrying the raw text.
pub async fn classify(
    session: &PromptSessionHandle,
    image: ImageInput,
) -> Result<PetImageAnalysis, RuntimeError> {
    let message = PromptMessage::user_with_image(CLASSIFICATION_INSTRUCTION, image);

    let raw_text = {
        let session = session.lock().await;
        session.prompt(std::slice::from_ref(&message)).await?
    };
    debug!(raw_len = raw_text.len(), "Classifier responded");

    Ok(parse_classification(&raw_text))
}
