use crate::{
    error::{AppError, Result},
    models::hive::Hive,
    state::AppState,
};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// A question category recognized by the rule-based responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Greetings,
    Hive,
    Disease,
    Honey,
    Winter,
    Swarm,
    Default,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Greetings => "greetings",
            Category::Hive => "hive",
            Category::Disease => "disease",
            Category::Honey => "honey",
            Category::Winter => "winter",
            Category::Swarm => "swarm",
            Category::Default => "default",
        };
        f.write_str(name)
    }
}

/// Ordered category patterns; the first match wins, so a question touching
/// several topics lands in the earliest category.
static CATEGORY_PATTERNS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    vec![
        (Category::Greetings, Regex::new(r"hello|hi |hey|greetings").unwrap()),
        (Category::Hive, Regex::new(r"hive|inspect|check|box|frame|super").unwrap()),
        (
            Category::Disease,
            Regex::new(r"disease|mite|foulbrood|nosema|parasite|pest|varroa").unwrap(),
        ),
        (Category::Honey, Regex::new(r"honey|harvest|nectar|extract|bottle|flow").unwrap()),
        (Category::Winter, Regex::new(r"winter|cold|prepare|insulate|cluster").unwrap()),
        (Category::Swarm, Regex::new(r"swarm|queen cell|split|divide").unwrap()),
    ]
});

const DEFAULT_RESPONSE: &str =
    "I'm your beekeeping assistant. Ask me anything about your hives, bees, or beekeeping practices!";

const GREETINGS_RESPONSES: &[&str] = &[
    "Hello! How can I assist with your beekeeping today?",
    "Hi there! What beekeeping questions can I help with?",
    "Greetings beekeeper! What can I help you with?",
];

const HIVE_RESPONSES: &[&str] = &[
    "Regular hive inspections should be conducted every 7-10 days during active season. Look for healthy brood patterns, adequate food stores, and signs of pests or disease.",
    "When inspecting your hive, work calmly and deliberately. Smoke the entrance and under the lid before opening. Always wear protective gear.",
    "The optimal hive temperature is around 35°C (95°F). Bees maintain this temperature by clustering or fanning their wings.",
];

const DISEASE_RESPONSES: &[&str] = &[
    "Common bee diseases include American foulbrood, European foulbrood, chalkbrood, and nosema. Regular inspections help catch these early.",
    "Varroa mites are a serious threat to honey bee colonies. Monitor mite levels monthly and treat when thresholds are exceeded.",
    "Signs of disease may include spotty brood patterns, discolored larvae, deformed wings, or unusual bee behavior.",
];

const HONEY_RESPONSES: &[&str] = &[
    "Honey is ready to harvest when frames are at least 80% capped. Test by giving the frame a gentle shake - if no nectar flies out, it's ready.",
    "On average, a strong hive can produce 25-40 pounds of honey per season, depending on location and forage availability.",
    "To extract honey, uncap the cells, place frames in an extractor, filter the honey, and let it settle before bottling.",
];

const WINTER_RESPONSES: &[&str] = &[
    "Prepare hives for winter by ensuring they have 60-90 pounds of honey stores, reducing entrance size, and possibly adding insulation.",
    "During winter, bees form a cluster and vibrate to generate heat. The cluster moves gradually through the hive to access honey stores.",
    "Avoid opening the hive during very cold weather. If you must check, do so quickly on a warmer day when temperatures are above 12°C (55°F).",
];

const SWARM_RESPONSES: &[&str] = &[
    "Signs of swarming include queen cells, overcrowding, and bees clustering outside the hive. Regular inspection can help prevent unexpected swarms.",
    "To prevent swarming, ensure adequate space by adding supers, practice queen management, and split strong colonies in spring.",
    "If your hive swarms, try to capture the swarm by placing them in a new hive with drawn comb or foundation and a food source.",
];

fn response_pool(category: Category) -> Option<&'static [&'static str]> {
    match category {
        Category::Greetings => Some(GREETINGS_RESPONSES),
        Category::Hive => Some(HIVE_RESPONSES),
        Category::Disease => Some(DISEASE_RESPONSES),
        Category::Honey => Some(HONEY_RESPONSES),
        Category::Winter => Some(WINTER_RESPONSES),
        Category::Swarm => Some(SWARM_RESPONSES),
        Category::Default => None,
    }
}

/// Classifies a question into a category.
pub fn determine_category(question: &str) -> Category {
    let question = question.to_lowercase();
    for (category, pattern) in CATEGORY_PATTERNS.iter() {
        if pattern.is_match(&question) {
            return *category;
        }
    }
    Category::Default
}

/// Picks an answer for an already-classified question, selecting uniformly
/// at random within the category's pool.
pub fn canned_answer_in(category: Category) -> &'static str {
    canned_answer_with(category, |len| rand::thread_rng().gen_range(0..len))
}

/// Like [`canned_answer_in`], with the pool index chosen by `select`. Tests
/// inject a deterministic selector here.
pub fn canned_answer_with(category: Category, select: impl FnOnce(usize) -> usize) -> &'static str {
    match response_pool(category) {
        Some(pool) => pool[select(pool.len()) % pool.len()],
        None => DEFAULT_RESPONSE,
    }
}

/// The sentiment of a parsed insight line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Negative,
    Warning,
}

/// A categorized, human-readable observation about hive conditions.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

static BULLET_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s*").unwrap());

/// Parses completion output into discrete insights: one per non-blank
/// line, leading bullet markers stripped, sentiment classified by
/// substring ("warning"/"alert" beats "decreased"/"low" beats positive).
pub fn parse_insights(text: &str) -> Vec<Insight> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let lower = line.to_lowercase();
            let kind = if lower.contains("warning") || lower.contains("alert") {
                InsightKind::Warning
            } else if lower.contains("decreased") || lower.contains("low") {
                InsightKind::Negative
            } else {
                InsightKind::Positive
            };

            Insight {
                kind,
                message: BULLET_PREFIX.replace(line.trim_start(), "").into_owned(),
            }
        })
        .collect()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct UpstreamError {
    error: UpstreamErrorBody,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Sends free text to the chat-completion upstream and returns the first
/// choice's content.
pub async fn complete(state: &AppState, content: &str) -> Result<String> {
    let api_key = state
        .config
        .completion_api_key
        .as_deref()
        .ok_or_else(|| AppError::Upstream("Completion API key is not configured".to_string()))?;

    let request = ChatRequest {
        model: &state.config.completion_model,
        messages: vec![ChatMessage {
            role: "user",
            content,
        }],
    };

    let response = state
        .http
        .post(&state.config.completion_url)
        .bearer_auth(api_key)
        .header("HTTP-Referer", &state.config.app_url)
        .header("X-Title", "Buzzkeeper")
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Completion request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .json::<UpstreamError>()
            .await
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("Completion request failed with status {}", status));
        return Err(AppError::Upstream(message));
    }

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid completion response: {}", e)))?;

    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AppError::Upstream("Completion response contained no choices".to_string()))
}

/// Runs the completion over `input` and parses the result into insights.
pub async fn produce_insights(state: &AppState, input: &str) -> Result<Vec<Insight>> {
    let content = complete(state, input).await?;
    Ok(parse_insights(&content))
}

/// Builds the analysis prompt from a user's hive telemetry.
pub fn telemetry_prompt(hives: &[Hive]) -> String {
    let mut data = String::new();
    for hive in hives {
        let fmt_reading = |value: Option<f64>, unit: &str| match value {
            Some(v) => format!("{}{}", v, unit),
            None => "unknown".to_string(),
        };

        data.push_str(&format!(
            "{}: temperature is {}, humidity is {}, weight is {}, bee activity is {}. ",
            hive.name,
            fmt_reading(hive.temperature, "°C"),
            fmt_reading(hive.humidity, "%"),
            fmt_reading(hive.weight, "kg"),
            fmt_reading(hive.activity, "%"),
        ));
    }

    format!(
        "Analyze the following beekeeping data and provide concise insights \
         (positive, negative, or warnings): {}Give short bullet point style insights.",
        data
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_disease_questions() {
        assert_eq!(
            determine_category("How do I treat varroa mites?"),
            Category::Disease
        );
    }

    #[test]
    fn classifies_greetings() {
        assert_eq!(determine_category("hello there"), Category::Greetings);
        assert_eq!(determine_category("Hey, quick question"), Category::Greetings);
    }

    #[test]
    fn first_match_wins_across_categories() {
        // Mentions both hives and honey; the hive pattern is checked first.
        assert_eq!(
            determine_category("When should I check my hive for honey?"),
            Category::Hive
        );
    }

    #[test]
    fn unmatched_questions_fall_through_to_default() {
        assert_eq!(determine_category("what is the weather"), Category::Default);
    }

    #[test]
    fn canned_answer_comes_from_the_matched_pool() {
        let category = determine_category("tell me about winter prep");
        let answer = canned_answer_with(category, |_| 1);
        assert_eq!(answer, WINTER_RESPONSES[1]);
    }

    #[test]
    fn default_category_gets_the_fixed_response() {
        let answer = canned_answer_with(Category::Default, |_| 0);
        assert_eq!(answer, DEFAULT_RESPONSE);
    }

    #[test]
    fn selector_index_wraps_into_the_pool() {
        let answer = canned_answer_with(Category::Swarm, |len| len + 1);
        assert!(SWARM_RESPONSES.contains(&answer));
    }

    #[test]
    fn parse_insights_strips_bullets_and_skips_blanks() {
        let text = "- Temperature is stable\n\n* Weight decreased by 0.5kg\n+ Warning: humidity high";
        let insights = parse_insights(text);

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].message, "Temperature is stable");
        assert_eq!(insights[0].kind, InsightKind::Positive);
        assert_eq!(insights[1].message, "Weight decreased by 0.5kg");
        assert_eq!(insights[1].kind, InsightKind::Negative);
        assert_eq!(insights[2].message, "Warning: humidity high");
        assert_eq!(insights[2].kind, InsightKind::Warning);
    }

    #[test]
    fn warning_outranks_negative_wording() {
        let insights = parse_insights("Alert: activity is low");
        assert_eq!(insights[0].kind, InsightKind::Warning);
    }

    #[test]
    fn empty_completion_yields_no_insights() {
        assert!(parse_insights("").is_empty());
        assert!(parse_insights("\n  \n").is_empty());
    }
}
