use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const NO_OVERVIEW: &str = "No overview available";

// 电影摘要 (catalog 与 generative 两条路径共用)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieSummary {
    pub id: Option<i64>,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub runtime: u32, // minutes
    pub rating: f64,  // 0-10
    pub trailer: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub budget: u64,
    pub revenue: u64,
    pub original_language: Option<String>,
    pub production_companies: Vec<String>,
    pub production_countries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub genres: Vec<String>,
    pub popularity: f64,
    pub status: Option<String>,
    pub rating_classification: Option<String>,
    pub popularity_tier: Option<String>,
}

impl MovieSummary {
    /// Build a summary from one raw JSON item, defaulting every absent field.
    ///
    /// Returns `None` for anything that is not a JSON object (including `null`).
    /// Accepts both the catalog's key names (`vote_average`, `certification`)
    /// and the flatter names used in generated answers (`rating`).
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let rating = first_number(obj, &["rating", "vote_average", "star_rating"])
            .unwrap_or(0.0)
            .clamp(0.0, 10.0);

        Some(Self {
            id: integer(obj.get("id")),
            title: string(obj, &["title", "name"]).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            overview: string(obj, &["overview"]).unwrap_or_else(|| NO_OVERVIEW.to_string()),
            release_date: string(obj, &["release_date"]),
            runtime: first_number(obj, &["runtime"]).map_or(0, |n| n.max(0.0) as u32),
            rating,
            trailer: string(obj, &["trailer", "trailer_key"]),
            backdrop_path: string(obj, &["backdrop_path"]),
            poster_path: string(obj, &["poster_path"]),
            budget: first_number(obj, &["budget"]).map_or(0, |n| n.max(0.0) as u64),
            revenue: first_number(obj, &["revenue"]).map_or(0, |n| n.max(0.0) as u64),
            original_language: string(obj, &["original_language"]),
            production_companies: names(obj.get("production_companies")),
            production_countries: names(obj.get("production_countries")),
            spoken_languages: names(obj.get("spoken_languages")),
            genres: names(obj.get("genres")),
            popularity: first_number(obj, &["popularity"]).unwrap_or(0.0),
            status: string(obj, &["status"]),
            rating_classification: string(obj, &["rating_classification", "certification"]),
            popularity_tier: string(obj, &["popularity_tier"]),
        })
    }

    /// Release year, when `release_date` is a valid `YYYY-MM-DD` date.
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        let date = self.release_date.as_deref()?;
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// Normalize a list of raw items, skipping anything that is not an object.
pub fn normalize_items(items: &[Value]) -> Vec<MovieSummary> {
    items.iter().filter_map(MovieSummary::from_value).collect()
}

/// Tier label derived from the catalog popularity score.
pub fn popularity_tier(popularity: f64) -> &'static str {
    if popularity >= 100.0 {
        "blockbuster"
    } else if popularity >= 20.0 {
        "popular"
    } else {
        "niche"
    }
}

fn string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        // Generated answers sometimes quote numbers ("148", "8.8")
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| number(obj.get(*k)))
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// 数组成员可以是字符串，也可以是带 name 字段的对象
fn names(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(o) => o
                .get("name")
                .or_else(|| o.get("english_name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect()
}

// 当前正在查询的后端
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    Catalog,
    Generative,
}

impl fmt::Display for SearchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchBackend::Catalog => f.write_str("catalog"),
            SearchBackend::Generative => f.write_str("generative"),
        }
    }
}

/// Observable state of one search session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<MovieSummary>,
    pub loading: bool,
    pub error: Option<String>,
    pub searching_service: Option<SearchBackend>,
}

impl SearchSnapshot {
    /// Process exit status for a one-shot search: non-zero on a catalog error.
    pub fn exit_code(&self) -> i32 {
        if self.error.is_some() {
            1
        } else {
            0
        }
    }
}

// 目录浏览列表
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    NowPlaying,
    Popular,
    Upcoming,
}

impl ListKind {
    pub fn path(&self) -> &'static str {
        match self {
            ListKind::NowPlaying => "now_playing",
            ListKind::Popular => "popular",
            ListKind::Upcoming => "upcoming",
        }
    }
}
