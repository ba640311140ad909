//! Attaches a generated image to every item of a suggestion result.
//!
//! Items are resolved in fixed-size batches: the members of a batch run
//! concurrently, and a batch starts only after the previous one has settled.
//! A failed image never fails the result; the item gets the placeholder.

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    suggestion::{
        entities::{DietCategory, SuggestionResult},
        ports::ImageGenerator,
        value_objects::{EnrichmentSettings, ImageRef, ImageRequest, ImageStyle},
    },
};

/// Where an item lives inside its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGroup {
    Diet(DietCategory),
    /// Index into the weekly plan.
    Day(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOrigin {
    pub group: ItemGroup,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedItem {
    pub origin: ItemOrigin,
    pub hint: String,
}

fn hint_for(image_hint: &Option<String>, name: &str) -> String {
    image_hint
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(name)
        .to_string()
}

/// Every item of `result` in document order, with the hint used to draw it.
pub fn flatten_items(result: &SuggestionResult) -> Vec<TaggedItem> {
    match result {
        SuggestionResult::Diet(diet) => DietCategory::ALL
            .into_iter()
            .flat_map(|category| {
                diet.category(category)
                    .iter()
                    .enumerate()
                    .map(move |(index, item)| TaggedItem {
                        origin: ItemOrigin {
                            group: ItemGroup::Diet(category),
                            index,
                        },
                        hint: hint_for(&item.image_hint, &item.name),
                    })
            })
            .collect(),
        SuggestionResult::Workout(workout) => workout
            .weekly_plan
            .iter()
            .enumerate()
            .flat_map(|(day, plan)| {
                plan.exercises
                    .iter()
                    .enumerate()
                    .map(move |(index, exercise)| TaggedItem {
                        origin: ItemOrigin {
                            group: ItemGroup::Day(day),
                            index,
                        },
                        hint: hint_for(&exercise.image_hint, &exercise.name),
                    })
            })
            .collect(),
    }
}

/// Resolves one image per item, `batch_size` at a time. Output order matches input order.
pub async fn resolve_in_batches<I: ImageGenerator>(
    images: &I,
    items: &[TaggedItem],
    batch_size: usize,
    style: ImageStyle,
) -> Vec<Result<ImageRef, CoreError>> {
    let mut resolved = Vec::with_capacity(items.len());

    for (batch, chunk) in items.chunks(batch_size.max(1)).enumerate() {
        debug!(batch, size = chunk.len(), "Resolving image batch");

        let settled = join_all(chunk.iter().map(|item| {
            images.generate_image(ImageRequest {
                hint: item.hint.clone(),
                style,
            })
        }))
        .await;

        resolved.extend(settled);
    }

    resolved
}

/// Turns settled outcomes into image references, substituting the placeholder for failures.
pub fn settle(
    items: &[TaggedItem],
    outcomes: Vec<Result<ImageRef, CoreError>>,
    placeholder: &ImageRef,
) -> Vec<ImageRef> {
    items
        .iter()
        .zip(outcomes)
        .map(|(item, outcome)| match outcome {
            Ok(image) => image,
            Err(e) => {
                warn!(hint = %item.hint, error = %e, "Image generation failed, using placeholder");
                placeholder.clone()
            }
        })
        .collect()
}

/// Writes `images[i]` into the item at `items[i].origin`. Items are otherwise untouched.
pub fn apply_images(
    mut result: SuggestionResult,
    items: &[TaggedItem],
    images: Vec<ImageRef>,
) -> SuggestionResult {
    for (item, image) in items.iter().zip(images) {
        let ItemOrigin { group, index } = item.origin;
        let slot = match (&mut result, group) {
            (SuggestionResult::Diet(diet), ItemGroup::Diet(category)) => diet
                .category_mut(category)
                .get_mut(index)
                .map(|s| &mut s.image_url),
            (SuggestionResult::Workout(workout), ItemGroup::Day(day)) => workout
                .weekly_plan
                .get_mut(day)
                .and_then(|plan| plan.exercises.get_mut(index))
                .map(|e| &mut e.image_url),
            _ => None,
        };

        if let Some(slot) = slot {
            *slot = Some(image.image_url);
        }
    }

    result
}

/// Enriches every item of `result`. Never fails; a result with no items is returned as is.
#[instrument(skip_all, fields(kind = %result.kind()))]
pub async fn enrich<I: ImageGenerator>(
    images: &I,
    settings: &EnrichmentSettings,
    result: SuggestionResult,
) -> SuggestionResult {
    let items = flatten_items(&result);
    if items.is_empty() {
        return result;
    }

    let outcomes = resolve_in_batches(images, &items, settings.batch_size, settings.style).await;
    let failures = outcomes.iter().filter(|o| o.is_err()).count();
    let resolved = settle(&items, outcomes, &settings.placeholder);

    debug!(items = items.len(), failures, "Enrichment finished");

    apply_images(result, &items, resolved)
}
