use crate::domain::{
    health_record::entities::HealthMetrics,
    suggestion::{
        contracts::{DAILY_PLAN_COUNT, MIN_CATEGORY_ITEMS},
        reference_ranges::{
            BLOOD_PRESSURE_RANGE, BMI_RANGE, CHOLESTEROL_RANGE, FATS_RANGE, SUGAR_RANGE,
            classify_diet_metrics, classify_workout_metrics,
        },
        value_objects::{
            DietarySuggestionRequest, ImageRequest, ImageStyle, SuggestionRequest,
            WorkoutSuggestionRequest,
        },
    },
};

fn reference_ranges(include_bmi: bool) -> String {
    let bmi = include_bmi.then(|| format!("- BMI: {BMI_RANGE}\n"));

    bmi.into_iter()
        .chain([
            format!("- Blood Pressure: {BLOOD_PRESSURE_RANGE}\n"),
            format!("- Cholesterol: {CHOLESTEROL_RANGE}\n"),
            format!("- Sugar Levels (fasting): {SUGAR_RANGE}\n"),
            format!("- Fats (%): {FATS_RANGE}\n"),
        ])
        .collect()
}

fn pre_classification<M: std::fmt::Debug, S: std::fmt::Debug>(
    classified: impl IntoIterator<Item = (M, S)>,
    label: impl Fn(&M) -> &'static str,
) -> String {
    classified
        .into_iter()
        .map(|(metric, status)| format!("- {}: {status:?}\n", label(&metric)))
        .collect()
}

fn as_metrics(request: &DietarySuggestionRequest) -> HealthMetrics {
    HealthMetrics {
        height: request.height,
        weight: request.weight,
        age: request.age,
        blood_pressure: request.blood_pressure.clone(),
        cholesterol: request.cholesterol,
        sugar_levels: request.sugar_levels,
        fats: request.fats,
        blood_points: request.blood_points,
        bmi: request.bmi,
    }
}

pub fn render_dietary_prompt(request: &DietarySuggestionRequest) -> String {
    let classified = pre_classification(classify_diet_metrics(&as_metrics(request)), |m| {
        m.label()
    });

    format!(
        r#"You are a meticulous registered dietitian. Build a dietary plan for this user where every recommendation is justified by their own metrics. Generic advice is not acceptable.

Rules:
1. Consider the metrics together, not in isolation.
2. Every item carries a one-sentence "reason" that names the metric it addresses.
3. Every item carries a short "imageHint" of one or two words describing the food, e.g. "blueberries".

Part 1, analysis: exactly one entry for each of Blood Pressure, Cholesterol, Sugar Levels and Fats, with status High, Low or Normal and a brief comment. Use these reference ranges:
{ranges}
Local classification of the same metrics, to agree with unless the metrics clearly say otherwise:
{classified}
Part 2, summary: two or three encouraging sentences.

Part 3: at least {min} items each of fruits, vegetables, proteins and seedsAndNuts.

Part 4: at least {min} foodsToLimit, each with a reason that follows from the metrics.

User metrics:
- Height: {height} cm
- Weight: {weight} kg
- Age: {age} years
- BMI: {bmi}
- Blood Pressure: {bp}
- Cholesterol: {chol} mg/dL
- Sugar Levels: {sugar} mg/dL
- Fats: {fats}%
- Blood Points: {points}
"#,
        ranges = reference_ranges(false),
        classified = classified,
        min = MIN_CATEGORY_ITEMS,
        height = request.height,
        weight = request.weight,
        age = request.age,
        bmi = request.bmi,
        bp = request.blood_pressure,
        chol = request.cholesterol,
        sugar = request.sugar_levels,
        fats = request.fats,
        points = request.blood_points,
    )
}

pub fn render_workout_prompt(request: &WorkoutSuggestionRequest) -> String {
    let metrics = HealthMetrics {
        height: 0.0,
        weight: request.weight,
        age: request.age,
        blood_pressure: request.blood_pressure.clone(),
        cholesterol: request.cholesterol,
        sugar_levels: request.sugar_levels,
        fats: request.fats,
        blood_points: request.blood_points,
        bmi: request.bmi,
    };
    let classified = pre_classification(classify_workout_metrics(&metrics), |m| m.label());

    format!(
        r#"You are an experienced personal trainer. Build a {days}-day workout plan for this user, tailored to their metrics.

Analysis: exactly one entry for each of BMI, Blood Pressure, Cholesterol, Sugar Levels and Fats. BMI uses Underweight, Healthy, Overweight or Obese; the others use High, Low or Normal. Use these reference ranges:
{ranges}
Local classification of the same metrics, to agree with unless the metrics clearly say otherwise:
{classified}
Summary: a brief, encouraging description of the approach.

Weekly plan: exactly {days} days mixing cardio and strength with at least one rest day. A rest day has an empty exercises list.
- High blood pressure: steady moderate-intensity cardio.
- High sugar levels: resistance training and intervals.
- High cholesterol: aerobic work.
- Overweight or Obese BMI: calorie-burning mix of cardio and strength.
Each day has a title, a short description and exercises with sets and reps. Every exercise carries a short "imageHint" of one or two words, e.g. "push ups".

User metrics:
- Age: {age} years
- Weight: {weight} kg
- BMI: {bmi}
- Blood Pressure: {bp}
- Cholesterol: {chol} mg/dL
- Sugar Levels: {sugar} mg/dL
- Fats: {fats}%
- Blood Points: {points}
"#,
        days = DAILY_PLAN_COUNT,
        ranges = reference_ranges(true),
        classified = classified,
        age = request.age,
        weight = request.weight,
        bmi = request.bmi,
        bp = request.blood_pressure,
        chol = request.cholesterol,
        sugar = request.sugar_levels,
        fats = request.fats,
        points = request.blood_points,
    )
}

pub fn render_suggestion_prompt(request: &SuggestionRequest) -> String {
    match request {
        SuggestionRequest::Diet(diet) => render_dietary_prompt(diet),
        SuggestionRequest::Workout(workout) => render_workout_prompt(workout),
    }
}

fn metric_block(metrics: &HealthMetrics) -> String {
    format!(
        "- Weight: {} kg\n- Height: {} cm\n- BMI: {}\n- Blood Pressure: {}\n- Cholesterol: {} mg/dL\n- Sugar Levels: {} mg/dL\n- Fats: {}%\n",
        metrics.weight,
        metrics.height,
        metrics.bmi,
        metrics.blood_pressure,
        metrics.cholesterol,
        metrics.sugar_levels,
        metrics.fats,
    )
}

pub fn render_progress_prompt(previous: &HealthMetrics, latest: &HealthMetrics) -> String {
    format!(
        r#"You are a health coach comparing a user's latest health record with their previous one.

overallStatus: Improved, Declined or Maintained.
summaryText: encouraging; acknowledge improvements and gently flag what needs attention.
metricChanges: exactly one entry for each of Weight, BMI, Blood Pressure, Cholesterol, Sugar Levels and Fats, with
- change: a short delta such as "-2 kg", "+5 mg/dL" or "Maintained" (both numbers for blood pressure),
- comment: one sentence,
- status: Improved, Declined or Maintained. Lower is generally better unless the value was already below its range.

Previous record:
{previous}
Latest record:
{latest}"#,
        previous = metric_block(previous),
        latest = metric_block(latest),
    )
}

pub fn render_image_prompt(request: &ImageRequest) -> String {
    match request.style {
        ImageStyle::Photorealistic => format!(
            "a high-quality, photorealistic image of {}, on a clean, light gray background",
            request.hint
        ),
        ImageStyle::Illustrative => format!(
            "a clean, vibrant digital illustration of {}, flat colors, simple background",
            request.hint
        ),
    }
}
