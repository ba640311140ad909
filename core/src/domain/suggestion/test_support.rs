//! In-memory adapters and response fixtures shared by the domain tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use serde_json::{Value, json};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health_record::{
        entities::{HealthMetrics, HealthRecord},
        ports::HealthRecordRepository,
        value_objects::{CreateHealthRecordInput, GetHealthRecordsFilter},
    },
    suggestion::{
        entities::{DietarySuggestions, SuggestionResult, WorkoutSuggestions},
        ports::{ImageGenerator, LLMClient, SuggestionCacheRepository},
        value_objects::{CacheKey, EnrichmentSettings, GenerationSettings, ImageRef, ImageRequest},
    },
};

pub(crate) type TestService = Service<FakeHealthRecords, FakeCache, ScriptedLlm, RecordingImages>;

pub(crate) fn service_with(records: FakeHealthRecords) -> TestService {
    Service::new(
        records,
        FakeCache::default(),
        ScriptedLlm::new(vec![]),
        RecordingImages::default(),
        GenerationSettings {
            max_attempts: 1,
            base_backoff: Duration::ZERO,
        },
        EnrichmentSettings::default(),
    )
}

pub(crate) fn sample_input(user_id: &str) -> CreateHealthRecordInput {
    CreateHealthRecordInput {
        user_id: user_id.to_string(),
        height: 175.0,
        weight: 80.0,
        age: 50,
        blood_pressure: "150/95".to_string(),
        cholesterol: 220.0,
        sugar_levels: 110.0,
        fats: 35.0,
        blood_points: 70.0,
    }
}

pub(crate) fn sample_metrics() -> HealthMetrics {
    HealthRecord::new(sample_input("user-1")).metrics
}

/// Records kept in insertion order; reads return them newest first.
#[derive(Clone, Default)]
pub(crate) struct FakeHealthRecords {
    records: Arc<Mutex<Vec<HealthRecord>>>,
}

impl FakeHealthRecords {
    pub(crate) fn insert(&self, record: HealthRecord) -> HealthRecord {
        self.records.lock().unwrap().push(record.clone());
        record
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl HealthRecordRepository for FakeHealthRecords {
    async fn create_record(&self, record: HealthRecord) -> Result<HealthRecord, CoreError> {
        Ok(self.insert(record))
    }

    async fn fetch_records_by_user(
        &self,
        user_id: String,
        filter: GetHealthRecordsFilter,
    ) -> Result<Vec<HealthRecord>, CoreError> {
        let records = self.records.lock().unwrap();
        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map_or(usize::MAX, |l| l as usize);

        Ok(records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeCache {
    entries: Arc<Mutex<HashMap<CacheKey, SuggestionResult>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FakeCache {
    pub(crate) fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub(crate) fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<SuggestionResult> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl SuggestionCacheRepository for FakeCache {
    async fn lookup(&self, key: CacheKey) -> Result<Option<SuggestionResult>, CoreError> {
        if self.fail_reads {
            return Err(CoreError::ExternalServiceError("cache unavailable".to_string()));
        }
        Ok(self.get(&key))
    }

    async fn store(&self, key: CacheKey, result: SuggestionResult) -> Result<(), CoreError> {
        if self.fail_writes {
            return Err(CoreError::ExternalServiceError("cache unavailable".to_string()));
        }
        self.entries.lock().unwrap().insert(key, result);
        Ok(())
    }
}

/// Replays canned responses in order and records every prompt it receives.
#[derive(Clone, Default)]
pub(crate) struct ScriptedLlm {
    script: Arc<Mutex<Vec<Result<String, CoreError>>>>,
    received: Arc<Mutex<Vec<(String, Value)>>>,
    delay: Duration,
}

impl ScriptedLlm {
    pub(crate) fn new(mut responses: Vec<Result<String, CoreError>>) -> Self {
        responses.reverse();
        Self {
            script: Arc::new(Mutex::new(responses)),
            ..Default::default()
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub(crate) fn last_call(&self) -> Option<(String, Value)> {
        self.received.lock().unwrap().last().cloned()
    }
}

impl LLMClient for ScriptedLlm {
    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Value,
    ) -> Result<String, CoreError> {
        self.received.lock().unwrap().push((prompt, response_schema));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.script.lock().unwrap().pop();
        next.unwrap_or_else(|| Err(CoreError::ExternalServiceError("script exhausted".to_string())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageEvent {
    Start(String),
    End(String),
}

/// Image generator that logs when each call starts and ends.
#[derive(Clone, Default)]
pub(crate) struct RecordingImages {
    events: Arc<Mutex<Vec<ImageEvent>>>,
    failing: Arc<HashSet<String>>,
    fail_all: bool,
}

impl RecordingImages {
    pub(crate) fn failing_on<const N: usize>(hints: [&str; N]) -> Self {
        Self {
            failing: Arc::new(hints.into_iter().map(str::to_string).collect()),
            ..Default::default()
        }
    }

    pub(crate) fn failing_all() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub(crate) fn url_for(hint: &str) -> String {
        format!("https://images.test/{}", hint.replace(' ', "-"))
    }

    pub(crate) fn started(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ImageEvent::Start(hint) => Some(hint.clone()),
                ImageEvent::End(_) => None,
            })
            .collect()
    }

    /// Sizes of the runs of calls that were in flight together.
    pub(crate) fn batches(&self) -> Vec<usize> {
        let mut batches = Vec::new();
        let mut running = 0;
        let mut current = 0;
        for event in self.events.lock().unwrap().iter() {
            match event {
                ImageEvent::Start(_) => {
                    assert_eq!(
                        running, current,
                        "a call started while the previous batch was settling"
                    );
                    running += 1;
                    current += 1;
                }
                ImageEvent::End(_) => {
                    running -= 1;
                    if running == 0 {
                        batches.push(current);
                        current = 0;
                    }
                }
            }
        }
        batches
    }
}

impl ImageGenerator for RecordingImages {
    async fn generate_image(&self, request: ImageRequest) -> Result<ImageRef, CoreError> {
        self.events
            .lock()
            .unwrap()
            .push(ImageEvent::Start(request.hint.clone()));

        tokio::task::yield_now().await;

        self.events
            .lock()
            .unwrap()
            .push(ImageEvent::End(request.hint.clone()));

        if self.fail_all || self.failing.contains(&request.hint) {
            return Err(CoreError::ExternalServiceError(format!(
                "no image for {}",
                request.hint
            )));
        }
        Ok(ImageRef::new(Self::url_for(&request.hint)))
    }
}

fn items(names: [&str; 3], reason: &str) -> Value {
    Value::Array(
        names
            .into_iter()
            .map(|name| json!({ "name": name, "reason": reason, "imageHint": name.to_lowercase() }))
            .collect(),
    )
}

pub(crate) fn dietary_response() -> Value {
    json!({
        "analysis": [
            { "metric": "Blood Pressure", "status": "High", "comment": "150/95 is above the normal range." },
            { "metric": "Cholesterol", "status": "High", "comment": "220 mg/dL is above 200." },
            { "metric": "Sugar Levels", "status": "High", "comment": "110 mg/dL suggests impaired fasting glucose." },
            { "metric": "Fats", "status": "High", "comment": "35% is above the healthy range." }
        ],
        "summary": "Focus on fibre and potassium while cutting sodium and refined sugar.",
        "fruits": items(["Blueberries", "Banana", "Apple"], "Fibre and potassium support your blood pressure."),
        "vegetables": items(["Spinach", "Broccoli", "Beetroot"], "Nitrates help lower your blood pressure."),
        "proteins": items(["Salmon", "Lentils", "Chicken breast"], "Lean protein without saturated fat helps your cholesterol."),
        "seedsAndNuts": items(["Almonds", "Flaxseed", "Walnuts"], "Unsaturated fats help lower your cholesterol."),
        "foodsToLimit": items(["Processed cheese", "White bread", "Soda"], "Sodium and refined sugar worsen your readings.")
    })
}

fn exercise(name: &str, sets: &str, reps: &str) -> Value {
    json!({ "name": name, "sets": sets, "reps": reps, "imageHint": name.to_lowercase() })
}

pub(crate) fn workout_response() -> Value {
    let day = |day: &str, title: &str, exercises: Vec<Value>| {
        json!({
            "day": day,
            "title": title,
            "description": format!("{title} for steady progress."),
            "exercises": exercises
        })
    };

    json!({
        "analysis": [
            { "metric": "BMI", "status": "Overweight", "comment": "26.1 is slightly above the healthy band." },
            { "metric": "Blood Pressure", "status": "High", "comment": "Favour steady cardio." },
            { "metric": "Cholesterol", "status": "High", "comment": "Aerobic work helps." },
            { "metric": "Sugar Levels", "status": "High", "comment": "Resistance training improves insulin sensitivity." },
            { "metric": "Fats", "status": "High", "comment": "Combine cardio and strength." }
        ],
        "summary": "Build a consistent aerobic base and add strength twice a week.",
        "weeklyPlan": [
            day("Monday", "Brisk walk", vec![exercise("Brisk walking", "1", "30 minutes")]),
            day("Tuesday", "Full body strength", vec![
                exercise("Goblet squat", "3", "10-12 reps"),
                exercise("Push ups", "3", "8-10 reps"),
            ]),
            day("Wednesday", "Cycling", vec![exercise("Stationary bike", "1", "25 minutes")]),
            day("Thursday", "Rest", vec![]),
            day("Friday", "Intervals", vec![exercise("Rowing intervals", "6", "1 minute on, 1 off")]),
            day("Saturday", "Strength", vec![
                exercise("Dumbbell row", "3", "10 reps"),
                exercise("Glute bridge", "3", "12 reps"),
            ]),
            day("Sunday", "Rest", vec![])
        ]
    })
}

pub(crate) fn progress_response() -> Value {
    json!({
        "overallStatus": "Improved",
        "summaryText": "Great work, your weight and cholesterol are trending down.",
        "metricChanges": [
            { "metric": "Weight", "change": "-4 kg", "comment": "Steady loss.", "status": "Improved" },
            { "metric": "BMI", "change": "-1.3", "comment": "Closer to healthy.", "status": "Improved" },
            { "metric": "Blood Pressure", "change": "Maintained", "comment": "Still elevated.", "status": "Maintained" },
            { "metric": "Cholesterol", "change": "-10 mg/dL", "comment": "Moving the right way.", "status": "Improved" },
            { "metric": "Sugar Levels", "change": "+2 mg/dL", "comment": "Keep an eye on it.", "status": "Declined" },
            { "metric": "Fats", "change": "-1%", "comment": "Small improvement.", "status": "Improved" }
        ]
    })
}

pub(crate) fn dietary_suggestions() -> DietarySuggestions {
    serde_json::from_value(dietary_response()).unwrap()
}

pub(crate) fn workout_suggestions() -> WorkoutSuggestions {
    serde_json::from_value(workout_response()).unwrap()
}
