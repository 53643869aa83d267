use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

// --- Provider trait ---

pub trait AiProvider {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
    #[allow(dead_code)]
    fn model_name(&self) -> &str;
}

// --- Gemini provider ---

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug)]
pub struct GeminiProvider {
    api_key: String,
    model_id: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    pub fn new() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set. Set it with: export GEMINI_API_KEY=your-key-here")?;
        let client = reqwest::blocking::Client::new();
        Ok(Self {
            api_key,
            model_id: GEMINI_MODEL.to_string(),
            client,
        })
    }
}

impl AiProvider for GeminiProvider {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: max_tokens,
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, self.model_id, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(anyhow!(
                "Gemini API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let api_response: GeminiResponse = response
            .json()
            .context("Failed to parse Gemini API response")?;

        api_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| anyhow!("No content in Gemini API response"))
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}

// --- Assist operations ---
//
// Every operation is a single-shot prompt with a fixed fallback: a failed
// call or an unparsable response surfaces a stderr notice and resolves to
// the fallback value, never an error. No retry, no cancellation.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    pub industry: String,
    pub compatibility_score: u32,
    pub found_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggested_skills: Vec<String>,
}

impl JobAnalysis {
    pub fn fallback() -> Self {
        Self {
            industry: "technology".to_string(),
            compatibility_score: 70,
            found_keywords: Vec::new(),
            missing_keywords: Vec::new(),
            suggested_skills: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImproveStrategy {
    Concise,
    Metrics,
    Action,
    Results,
}

impl ImproveStrategy {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "concise" => Some(Self::Concise),
            "metrics" => Some(Self::Metrics),
            "action" => Some(Self::Action),
            "results" => Some(Self::Results),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Metrics => "metrics",
            Self::Action => "action",
            Self::Results => "results",
        }
    }
}

/// Extract the first balanced-looking JSON payload between `open` and the
/// last `close`. Models often wrap JSON in markdown fences.
fn extract_json(response: &str, open: char, close: char) -> Option<&str> {
    let start = response.find(open)?;
    let end = response.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&response[start..=end])
}

pub fn analyze_job_description(provider: &dyn AiProvider, job_description: &str) -> JobAnalysis {
    let prompt = format!(
        "Analyze this job description and extract information:\n\
        \"{job_description}\"\n\n\
        Determine the industry (technology, finance, marketing, or healthcare).\n\
        Calculate a compatibility score between 60-90%.\n\
        Identify relevant keywords found in the description.\n\
        Suggest 5 relevant keywords that are not explicitly mentioned.\n\
        Format your response as JSON with these fields:\n\
        {{\n\
          \"industry\": string,\n\
          \"compatibilityScore\": number,\n\
          \"foundKeywords\": string[],\n\
          \"missingKeywords\": string[],\n\
          \"suggestedSkills\": string[]\n\
        }}"
    );

    match provider.complete(&prompt, 4096) {
        Ok(response) => {
            let parsed = extract_json(&response, '{', '}')
                .and_then(|json| serde_json::from_str::<JobAnalysis>(json).ok());
            match parsed {
                Some(analysis) => analysis,
                None => {
                    eprintln!("Could not parse job analysis response; using fallback");
                    JobAnalysis::fallback()
                }
            }
        }
        Err(e) => {
            eprintln!("Job analysis request failed ({e:#}); using fallback");
            JobAnalysis::fallback()
        }
    }
}

pub fn generate_summary(
    provider: &dyn AiProvider,
    title: &str,
    industry: &str,
    years: u32,
) -> String {
    let prompt = format!(
        "Generate a professional resume summary for a {title} with {years} years of \
         experience in the {industry} industry.\n\
         The summary should be 2-3 sentences, highlighting skills, strengths, \
         achievements, and outcomes.\n\
         Make it compelling and professional."
    );

    match provider.complete(&prompt, 1024) {
        Ok(summary) => summary.trim().to_string(),
        Err(e) => {
            eprintln!("Summary request failed ({e:#}); using fallback");
            format!(
                "Experienced {title} with {years} years in {industry}, focused on \
                 delivering results and driving innovation."
            )
        }
    }
}

pub fn improve_bullet_point(
    provider: &dyn AiProvider,
    bullet_point: &str,
    strategy: ImproveStrategy,
) -> String {
    let prompt = format!(
        "Improve this resume bullet point: \"{bullet_point}\"\n\n\
         Improvement type: {}\n\n\
         If \"concise\": Make it shorter and more impactful.\n\
         If \"metrics\": Add specific metrics/numbers if not present.\n\
         If \"action\": Start with a strong action verb if not already.\n\
         If \"results\": Highlight results/outcomes if not already.\n\n\
         Return only the improved bullet point with no additional explanations.",
        strategy.name()
    );

    match provider.complete(&prompt, 1024) {
        Ok(improved) => improved.trim().to_string(),
        Err(e) => {
            eprintln!("Bullet improvement request failed ({e:#}); keeping original");
            bullet_point.to_string()
        }
    }
}

pub fn generate_bullet_points(
    provider: &dyn AiProvider,
    title: &str,
    industry: &str,
) -> Vec<String> {
    let fallback = || {
        vec![
            format!("Led key initiatives for {industry} projects, resulting in improved outcomes"),
            "Developed strategic solutions that enhanced team productivity".to_string(),
            "Implemented process improvements that reduced costs".to_string(),
        ]
    };

    let prompt = format!(
        "Generate 3-5 strong resume bullet points for a {title} position in the \
         {industry} industry.\n\
         Each bullet should:\n\
         1. Start with a strong action verb\n\
         2. Include specific accomplishments\n\
         3. Incorporate metrics where possible\n\
         4. Be concise and impactful\n\n\
         Format your response as a JSON array of strings, each string being a bullet point."
    );

    match provider.complete(&prompt, 2048) {
        Ok(response) => {
            let parsed = extract_json(&response, '[', ']')
                .and_then(|json| serde_json::from_str::<Vec<String>>(json).ok());
            match parsed {
                Some(bullets) if !bullets.is_empty() => bullets,
                _ => {
                    eprintln!("Could not parse bullet points response; using fallback");
                    fallback()
                }
            }
        }
        Err(e) => {
            eprintln!("Bullet points request failed ({e:#}); using fallback");
            fallback()
        }
    }
}

pub fn generate_cover_letter(
    provider: &dyn AiProvider,
    name: &str,
    position: &str,
    company: Option<&str>,
    skills: &[String],
) -> String {
    let company = company.unwrap_or("the company");
    let current_date = chrono::Local::now().format("%B %-d, %Y").to_string();
    let skills_text = if skills.is_empty() {
        "relevant skills".to_string()
    } else {
        skills.join(", ")
    };

    let prompt = format!(
        "Write a professional cover letter for {name} applying for the {position} \
         position at {company}.\n\
         Include these skills: {skills_text}.\n\
         Format it as a formal letter with the current date ({current_date}), greeting, \
         3-4 paragraphs of content, and a closing.\n\
         The letter should be personalized, professional, and highlight relevant \
         qualifications."
    );

    match provider.complete(&prompt, 4096) {
        Ok(letter) => letter.trim().to_string(),
        Err(e) => {
            eprintln!("Cover letter request failed ({e:#}); using fallback");
            format!(
                "{current_date}\n\n\
                 Dear Hiring Manager,\n\n\
                 I am writing to express my interest in the {position} position at \
                 {company}. With my background in {skills_text}, I am confident in my \
                 ability to contribute to your team.\n\n\
                 Thank you for considering my application.\n\n\
                 Sincerely,\n\
                 {name}"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `response: None` simulates a transport failure.
    struct MockProvider {
        response: Option<String>,
    }

    impl MockProvider {
        fn ok(response: &str) -> Self {
            Self {
                response: Some(response.to_string()),
            }
        }

        fn failing() -> Self {
            Self { response: None }
        }
    }

    impl AiProvider for MockProvider {
        fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
            self.response
                .clone()
                .ok_or_else(|| anyhow!("simulated network failure"))
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    #[test]
    fn test_analyze_failure_returns_exact_fallback() {
        let analysis = analyze_job_description(&MockProvider::failing(), "any description");
        assert_eq!(analysis, JobAnalysis::fallback());
        assert_eq!(analysis.industry, "technology");
        assert_eq!(analysis.compatibility_score, 70);
        assert!(analysis.found_keywords.is_empty());
        assert!(analysis.missing_keywords.is_empty());
        assert!(analysis.suggested_skills.is_empty());
    }

    #[test]
    fn test_analyze_unparsable_returns_fallback() {
        let provider = MockProvider::ok("Sorry, I can't help with that.");
        let analysis = analyze_job_description(&provider, "any description");
        assert_eq!(analysis, JobAnalysis::fallback());
    }

    #[test]
    fn test_analyze_parses_fenced_json() {
        let provider = MockProvider::ok(
            "```json\n{\"industry\":\"finance\",\"compatibilityScore\":82,\
             \"foundKeywords\":[\"sql\"],\"missingKeywords\":[\"risk\"],\
             \"suggestedSkills\":[\"excel\"]}\n```",
        );
        let analysis = analyze_job_description(&provider, "a fintech job");
        assert_eq!(analysis.industry, "finance");
        assert_eq!(analysis.compatibility_score, 82);
        assert_eq!(analysis.found_keywords, vec!["sql"]);
        assert_eq!(analysis.missing_keywords, vec!["risk"]);
        assert_eq!(analysis.suggested_skills, vec!["excel"]);
    }

    #[test]
    fn test_summary_failure_fallback_text() {
        let summary = generate_summary(&MockProvider::failing(), "Data Engineer", "finance", 4);
        assert_eq!(
            summary,
            "Experienced Data Engineer with 4 years in finance, focused on delivering \
             results and driving innovation."
        );
    }

    #[test]
    fn test_summary_success_is_trimmed() {
        let provider = MockProvider::ok("  A crisp professional summary.\n");
        let summary = generate_summary(&provider, "PM", "technology", 7);
        assert_eq!(summary, "A crisp professional summary.");
    }

    #[test]
    fn test_improve_bullet_failure_keeps_original() {
        let original = "Did some stuff with databases";
        let improved =
            improve_bullet_point(&MockProvider::failing(), original, ImproveStrategy::Metrics);
        assert_eq!(improved, original);
    }

    #[test]
    fn test_bullet_points_parses_json_array() {
        let provider = MockProvider::ok("[\"Shipped X\", \"Grew Y by 20%\"]");
        let bullets = generate_bullet_points(&provider, "PM", "technology");
        assert_eq!(bullets, vec!["Shipped X", "Grew Y by 20%"]);
    }

    #[test]
    fn test_bullet_points_failure_returns_three_fallbacks() {
        let bullets = generate_bullet_points(&MockProvider::failing(), "PM", "healthcare");
        assert_eq!(bullets.len(), 3);
        assert!(bullets[0].contains("healthcare"));
    }

    #[test]
    fn test_bullet_points_unparsable_returns_fallbacks() {
        let provider = MockProvider::ok("Here are some bullets:\n- one\n- two");
        let bullets = generate_bullet_points(&provider, "PM", "marketing");
        assert_eq!(bullets.len(), 3);
        assert!(bullets[0].contains("marketing"));
    }

    #[test]
    fn test_cover_letter_failure_fallback_contents() {
        let skills = vec!["Rust".to_string(), "SQL".to_string()];
        let letter = generate_cover_letter(
            &MockProvider::failing(),
            "Jane Smith",
            "Staff Engineer",
            None,
            &skills,
        );
        assert!(letter.contains("Dear Hiring Manager,"));
        assert!(letter.contains("Staff Engineer position at the company"));
        assert!(letter.contains("Rust, SQL"));
        assert!(letter.ends_with("Jane Smith"));
    }

    #[test]
    fn test_cover_letter_company_defaults() {
        let letter = generate_cover_letter(
            &MockProvider::failing(),
            "Jane",
            "PM",
            Some("Acme Corp"),
            &[],
        );
        assert!(letter.contains("at Acme Corp"));
        assert!(letter.contains("relevant skills"));
    }

    #[test]
    fn test_improve_strategy_parse() {
        assert_eq!(ImproveStrategy::parse("concise"), Some(ImproveStrategy::Concise));
        assert_eq!(ImproveStrategy::parse("metrics"), Some(ImproveStrategy::Metrics));
        assert_eq!(ImproveStrategy::parse("action"), Some(ImproveStrategy::Action));
        assert_eq!(ImproveStrategy::parse("results"), Some(ImproveStrategy::Results));
        assert_eq!(ImproveStrategy::parse("magic"), None);
    }

    #[test]
    fn test_gemini_provider_requires_api_key() {
        let original = env::var("GEMINI_API_KEY").ok();
        unsafe {
            env::remove_var("GEMINI_API_KEY");
        }

        let result = GeminiProvider::new();

        if let Some(val) = original {
            unsafe {
                env::set_var("GEMINI_API_KEY", val);
            }
        }

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("GEMINI_API_KEY"));
    }
}
