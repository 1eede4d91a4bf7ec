// 从生成式回答中提取电影数组
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("valid fence pattern"));

/// Pull the movie array out of a generated answer.
///
/// A fenced ```` ```json ```` block wins over the raw text. The parsed value
/// is accepted as a bare array, or as an object with a `movies` or `results`
/// array, in that order. Anything else is `None`.
pub fn extract_movies(answer: &str) -> Option<Vec<Value>> {
    let body = match JSON_FENCE.captures(answer) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => answer.trim(),
    };

    let parsed: Value = serde_json::from_str(body).ok()?;
    accept_shape(parsed)
}

fn accept_shape(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut obj) => match obj.remove("movies") {
            Some(Value::Array(items)) => Some(items),
            _ => match obj.remove("results") {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
        },
        _ => None,
    }
}

/// Prompt asking for exactly eight movies in the `{ "movies": [...] }` envelope.
pub fn build_prompt(query: &str) -> String {
    format!(
        r#"You are a movie database. Find exactly 8 movies that best match the search "{query}".
Respond only with JSON of the form:
{{
  "movies": [
    {{
      "id": null,
      "title": "string",
      "overview": "string",
      "release_date": "YYYY-MM-DD",
      "runtime": 0,
      "rating": 0.0,
      "trailer": "YouTube video key or null",
      "backdrop_path": null,
      "poster_path": null,
      "budget": 0,
      "revenue": 0,
      "original_language": "ISO 639-1 code",
      "production_companies": ["string"],
      "production_countries": ["string"],
      "spoken_languages": ["string"],
      "genres": ["string"],
      "popularity": 0.0,
      "status": "Released",
      "rating_classification": "string",
      "popularity_tier": "string"
    }}
  ]
}}
runtime is in minutes. rating is out of 10. budget and revenue are in US dollars."#
    )
}
