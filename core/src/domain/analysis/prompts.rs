use crate::domain::analysis::{
    entities::AnalysisRecord,
    headings::{
        ANALYSIS_DETAILS, AYURVEDIC_MEDICATION, BENEFITS, BREAKFAST, CONDITION_ACTIONS_SUFFIX,
        CONDITION_PREVENTION_SUFFIX, DESCRIPTION, DINNER, DONTS, DOS, EXERCISE_PLAN,
        FOLLOW_UP_ACTIONS, HEALTH_SCORE, IMPORTANCE, LUNCH, MEAL_NOTE_OPENING,
        MEAL_RECOMMENDATIONS, MEDICINE_RECOMMENDATIONS, POSSIBLE_CONDITIONS, POSSIBLE_DISEASES,
        PREPARATION_REQUIRED, PREVENTIVE_MEASURES, PURPOSE, RECOMMENDATION,
        RECOMMENDATION_REASON, REPORTS_REQUIRED, RISK_FACTORS, URGENCY_LEVEL,
    },
    value_objects::{
        AnalyzeSymptomsInput, FollowUpAnalysisInput, PatientProfile, QuickAnalyzeInput, Symptom,
    },
};

const NONE_REPORTED: &str = "None reported";
const NOT_SPECIFIED: &str = "Not specified";

pub fn render_analysis_prompt(input: &AnalyzeSymptomsInput) -> String {
    let symptoms = format_symptoms(&input.symptoms);
    let history = format_history(&input.patient);
    let lifestyle = &input.lifestyle;

    let context = PatientContext {
        diet_preference: &input.diet_preference,
        symptoms: &symptoms,
        history: &history,
        exercise_frequency: &lifestyle.exercise_frequency,
        sleep_quality: &lifestyle.sleep_quality,
        stress_level: &lifestyle.stress_level,
        allergies: or_none_reported(&input.allergies),
        current_medications: or_none_reported(&input.current_medications),
        recent_life_changes: or_none_reported(&input.recent_life_changes),
    };

    format!(
        "Analyze the following symptoms as a medical AI assistant. Provide a comprehensive medical \
analysis based on the symptoms, age, gender, height, weight, medical history, lifestyle factors \
and additional details provided.

PATIENT INFORMATION:
{patient}
Symptoms:
{symptoms}
Medical History:
{history}

Additional Medical History (in patient's own words):
{history_text}

LIFESTYLE FACTORS:
Exercise Frequency: {exercise}
Sleep Quality: {sleep}
Stress Level: {stress}

Diet Preference: {diet}
Current Medications: {medications}
Allergies: {allergies}
Recent Life Changes: {changes}

{instructions}",
        patient = format_patient(&input.patient),
        history_text = or_none_reported(&input.patient.medical_history_text),
        exercise = context.exercise_frequency,
        sleep = context.sleep_quality,
        stress = context.stress_level,
        diet = context.diet_preference,
        medications = context.current_medications,
        allergies = context.allergies,
        changes = context.recent_life_changes,
        instructions = full_format_instructions(&context),
    )
}

pub fn render_quick_prompt(input: &QuickAnalyzeInput) -> String {
    let age = input
        .age
        .map(|age| age.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    format!(
        "As a medical AI assistant, analyze the following symptoms briefly:

PATIENT INFORMATION:
Age: {age}
Symptoms: {symptoms}

Please provide a brief analysis with EACH section clearly separated:

{POSSIBLE_CONDITIONS}:
List 3-5 potential conditions that could explain these symptoms, from most to least likely.
Format each as a simple name without percentages.

{RECOMMENDATION}:
Give a single paragraph recommendation for the patient.

{URGENCY_LEVEL}:
Specify urgency as 'low', 'medium', or 'high' - one word only.

DO NOT include any other sections and keep the analysis brief and focused.
DO NOT use asterisks (*) anywhere in your response.
",
        symptoms = input.symptoms.trim(),
    )
}

/// Prompt for re-analysing a patient when a new document or set of notes
/// arrives. The earlier record is summarised for the generator and the reply
/// is expected in the full section format.
pub fn render_follow_up_prompt(input: &FollowUpAnalysisInput) -> String {
    let symptoms = format_symptoms(&input.reported_symptoms);
    let history = summarize_previous(&input.previous_analysis);
    let document = input.document_text.trim();

    let context = PatientContext {
        diet_preference: &input.diet_preference,
        symptoms: &symptoms,
        history: &history,
        exercise_frequency: NOT_SPECIFIED,
        sleep_quality: NOT_SPECIFIED,
        stress_level: NOT_SPECIFIED,
        allergies: NONE_REPORTED,
        current_medications: NONE_REPORTED,
        recent_life_changes: NONE_REPORTED,
    };

    format!(
        "As a medical AI assistant, update an earlier symptom analysis using the new document \
provided below. Revise condition probabilities where the new information supports it and say so \
in the descriptions.

PREVIOUS ANALYSIS:
{history}

CURRENTLY REPORTED SYMPTOMS:
{symptoms}

NEW DOCUMENT:
{document}

Diet Preference: {diet}

{instructions}",
        document = if document.is_empty() { NONE_REPORTED } else { document },
        diet = input.diet_preference,
        instructions = full_format_instructions(&context),
    )
}

/// Patient details interpolated into the per-section instructions.
struct PatientContext<'a> {
    diet_preference: &'a str,
    symptoms: &'a str,
    history: &'a str,
    exercise_frequency: &'a str,
    sleep_quality: &'a str,
    stress_level: &'a str,
    allergies: &'a str,
    current_medications: &'a str,
    recent_life_changes: &'a str,
}

fn full_format_instructions(context: &PatientContext<'_>) -> String {
    let condition_line = "N. Condition Name (Probability: XX%): Brief description of the condition.";
    let ayurvedic_block = format!(
        "N. [Ayurvedic Medicine/Herb/Treatment Name]
   - {DESCRIPTION}: A paragraph describing this approach and how it relates to the patient's symptoms, history and lifestyle.
   - {IMPORTANCE}: A paragraph explaining why this approach is important for the patient's condition.
   - {BENEFITS}: A paragraph explaining the specific benefits for the patient's condition and symptoms."
    );
    let report_block = format!(
        "N. [Test/Report Name]
   - {PURPOSE}: [4-5 bullet points about why this test is needed]
   - {BENEFITS}: [4-5 bullet points about the benefits of this test]
   - {ANALYSIS_DETAILS}: [4-5 bullet points about what this test measures]
   - {PREPARATION_REQUIRED}: [4-5 bullet points about how to prepare for this test]
   - {RECOMMENDATION_REASON}: [4-5 bullet points about why you recommend this test]"
    );

    format!(
        "Please provide a comprehensive analysis with EACH section clearly separated by its own heading.
Use the EXACT section headings below - do not combine or merge sections:

{POSSIBLE_CONDITIONS}:
YOU MUST LIST EXACTLY 5 POTENTIAL CONDITIONS. No more, no less.
Each condition should have its own probability percentage (0-100%).
Format each one as:
{condition_line}

IMMEDIATELY after each condition, include these subsections:

[CONDITION_NAME] {CONDITION_ACTIONS_SUFFIX}:
1. [Specific action for this condition]
(5-7 numbered actions)

[CONDITION_NAME] {CONDITION_PREVENTION_SUFFIX}:
1. [Specific preventive measure for this condition]
(5-7 numbered measures)

Example structure:
1. Migraine (Probability: 75%): A neurological condition...

MIGRAINE {CONDITION_ACTIONS_SUFFIX}:
1. Rest in a dark, quiet room
2. Apply cold compresses to forehead

MIGRAINE {CONDITION_PREVENTION_SUFFIX}:
1. Identify and avoid personal triggers
2. Maintain regular sleep schedule

{RECOMMENDATION}:
Give an overall recommendation for the patient.

{URGENCY_LEVEL}:
Specify urgency as 'low', 'medium', or 'high' - one word only.

{FOLLOW_UP_ACTIONS}:
List 5-7 recommended next steps, each on a new line with a number.

{RISK_FACTORS}:
List 5-7 potential risk factors based on the symptoms, lifestyle factors and medical history, each on a new line with a number.

{MEAL_RECOMMENDATIONS}:
Suggest specific Indian meals for a {diet} diet preference, taking into account the symptoms:
{symptoms}
the medical history:
{history}
allergies ({allergies}), current medications ({medications}) and recent life changes ({changes}).
Organize in three clearly labeled sections:
{BREAKFAST}: List 5 meal options with ingredients, total calories, micro and macro nutrients and benefits, each on a new line with a number.
{LUNCH}: List 5 meal options with ingredients, total calories, micro and macro nutrients and benefits, each on a new line with a number.
{DINNER}: List 5 meal options with ingredients, total calories, micro and macro nutrients and benefits, each on a new line with a number.
If the patient has allergies, avoid those foods in the recommendations.
At the end of this section, add: \"{MEAL_NOTE_OPENING} {diet} diet preference.\"

{EXERCISE_PLAN}:
List 3-5 recommended exercises based on the current exercise frequency ({exercise}) and stress level ({stress}), each on a new line with a number.

{POSSIBLE_DISEASES}:
List 3-5 potential diseases associated with these symptoms, each on a new line with a number.

{PREVENTIVE_MEASURES}:
List 5-7 preventive measures, focusing on sleep quality ({sleep}) and stress level ({stress}), each on a new line with a number.

{MEDICINE_RECOMMENDATIONS}:
List 3-5 over-the-counter medicines (with a disclaimer to consult a doctor), each on a new line with a number.
Consider any current medications the patient is taking to avoid interactions.

{AYURVEDIC_MEDICATION}:
Provide exactly 5 Ayurvedic recommendations, each structured as follows:
{ayurvedic_block}

{DOS}:
List 3-5 things the patient should do, each on a new line with a number.

{DONTS}:
List 3-5 things the patient should avoid, each on a new line with a number.

{REPORTS_REQUIRED}:
Recommend 3-5 diagnostic tests or medical reports the patient should obtain.
Format each report exactly as follows:
{report_block}
Each report MUST be numbered and MUST have all five subsections, each starting with a dash followed by the label and a colon.

{HEALTH_SCORE}:
Provide a numerical health score from 1-10 (where 10 is perfectly healthy) with a brief one-sentence explanation.
Format: [Score]/10 - [Brief explanation]

IMPORTANT FORMATTING RULES:
1. Use ONLY the EXACT section headings provided above.
2. Each section MUST have its own clear heading.
3. DO NOT use asterisks (*) anywhere in your response.
4. Number each list item (1., 2., 3., etc.).
5. Keep each section separate - do not combine multiple sections into one.
6. For each condition, include condition-specific recommended actions and preventive measures.
",
        diet = context.diet_preference,
        symptoms = context.symptoms,
        history = context.history,
        allergies = context.allergies,
        medications = context.current_medications,
        changes = context.recent_life_changes,
        exercise = context.exercise_frequency,
        stress = context.stress_level,
        sleep = context.sleep_quality,
    )
}

fn format_patient(patient: &PatientProfile) -> String {
    let age = patient.age.map(|age| age.to_string());
    let height = patient.height_cm.map(|height| format!("{height} cm"));
    let weight = patient.weight_kg.map(|weight| format!("{weight} kg"));

    format!(
        "Age: {}\nGender: {}\nHeight: {}\nWeight: {}",
        age.as_deref().unwrap_or(NOT_SPECIFIED),
        patient.gender.as_deref().unwrap_or(NOT_SPECIFIED),
        height.as_deref().unwrap_or(NOT_SPECIFIED),
        weight.as_deref().unwrap_or(NOT_SPECIFIED),
    )
}

fn format_symptoms(symptoms: &[Symptom]) -> String {
    if symptoms.is_empty() {
        return NONE_REPORTED.to_string();
    }

    symptoms
        .iter()
        .map(|symptom| {
            format!(
                "- {} (Severity: {}/10, Duration: {})",
                symptom.name, symptom.severity, symptom.duration
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_history(patient: &PatientProfile) -> String {
    if patient.medical_history.is_empty() {
        return "None".to_string();
    }

    patient
        .medical_history
        .iter()
        .map(|condition| format!("- {condition}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn summarize_previous(record: &AnalysisRecord) -> String {
    let conditions = record
        .possible_conditions
        .iter()
        .map(|condition| format!("- {} ({}%)", condition.name, condition.probability))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Conditions:\n{conditions}\nUrgency: {}\nHealth Score: {}/10\nRecommendation: {}",
        record.urgency, record.health_score, record.recommendation
    )
}

fn or_none_reported(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { NONE_REPORTED } else { value }
}
