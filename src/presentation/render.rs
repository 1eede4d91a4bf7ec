use crate::domain::model::{MovieSummary, SearchBackend, SearchSnapshot};
use crate::presentation::theme::Theme;
use std::fmt::Write;

const OVERVIEW_WIDTH: usize = 160;

/// Format a numbered movie list
pub fn format_movies(
    heading: &str,
    movies: &[MovieSummary],
    theme: &Theme,
    enable_emoji: bool,
) -> String {
    let mut output = String::new();
    let icon = if enable_emoji { "🎬 " } else { "" };
    writeln!(output, "{}{}", icon, (theme.title)(heading)).ok();

    if movies.is_empty() {
        writeln!(output, "  {}", (theme.meta)("No movies found")).ok();
        return output;
    }

    let cutoff = "⸺".repeat(40);
    writeln!(output, "  {}", (theme.line)(&cutoff)).ok();

    for (i, movie) in movies.iter().enumerate() {
        let year = movie
            .release_year()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        writeln!(
            output,
            "  {}. {}{}  {}",
            (theme.idx)(&(i + 1).to_string()),
            (theme.title)(&movie.title),
            (theme.year)(&year),
            (theme.rating)(&rating_label(movie.rating, enable_emoji))
        )
        .ok();
        writeln!(
            output,
            "     {}",
            (theme.overview)(&truncate(&movie.overview, OVERVIEW_WIDTH))
        )
        .ok();
    }

    output
}

/// Format the full detail view of one movie
pub fn format_details(movie: &MovieSummary, theme: &Theme, enable_emoji: bool) -> String {
    let mut output = String::new();

    let year = movie
        .release_year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    writeln!(output, "{}{}", (theme.title)(&movie.title), (theme.year)(&year)).ok();
    writeln!(output, "  {}", (theme.rating)(&rating_label(movie.rating, enable_emoji))).ok();
    writeln!(output).ok();
    writeln!(output, "  {}", (theme.overview)(&movie.overview)).ok();
    writeln!(output).ok();

    let mut field = |label: &str, value: String| {
        if !value.is_empty() {
            writeln!(output, "  {:<14} {}", (theme.meta)(label), value).ok();
        }
    };

    field("Released", movie.release_date.clone().unwrap_or_default());
    field("Status", movie.status.clone().unwrap_or_default());
    field(
        "Runtime",
        if movie.runtime > 0 {
            format!("{} min", movie.runtime)
        } else {
            String::new()
        },
    );
    field("Genres", movie.genres.join(", "));
    field("Certification", movie.rating_classification.clone().unwrap_or_default());
    field("Language", movie.original_language.clone().unwrap_or_default());
    field("Spoken", movie.spoken_languages.join(", "));
    field("Companies", movie.production_companies.join(", "));
    field("Countries", movie.production_countries.join(", "));
    field("Budget", money(movie.budget));
    field("Revenue", money(movie.revenue));
    field("Popularity", popularity_label(movie));
    field(
        "Trailer",
        movie
            .trailer
            .as_deref()
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
            .unwrap_or_default(),
    );

    output
}

/// One status block for a search snapshot (interactive mode)
pub fn format_snapshot(snapshot: &SearchSnapshot, theme: &Theme, enable_emoji: bool) -> String {
    if let Some(error) = &snapshot.error {
        return format!("{}\n", (theme.error)(&format!("✘ {}", error)));
    }

    if let Some(backend) = snapshot.searching_service {
        let label = match backend {
            SearchBackend::Catalog => "Searching catalog...",
            SearchBackend::Generative => "Asking the generative fallback...",
        };
        return format!("{}\n", (theme.source)(label));
    }

    if snapshot.results.is_empty() {
        if snapshot.loading {
            return format!("{}\n", (theme.source)("Still searching..."));
        }
        return String::new();
    }

    format_movies(&snapshot.query, &snapshot.results, theme, enable_emoji)
}

fn rating_label(rating: f64, enable_emoji: bool) -> String {
    if enable_emoji {
        format!("★ {:.1}", rating)
    } else {
        format!("{:.1}/10", rating)
    }
}

fn popularity_label(movie: &MovieSummary) -> String {
    match (&movie.popularity_tier, movie.popularity > 0.0) {
        (Some(tier), true) => format!("{:.1} ({})", movie.popularity, tier),
        (Some(tier), false) => tier.clone(),
        (None, true) => format!("{:.1}", movie.popularity),
        (None, false) => String::new(),
    }
}

fn money(amount: u64) -> String {
    if amount == 0 {
        return String::new();
    }
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
