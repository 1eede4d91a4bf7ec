use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub year: fn(&str) -> String,
    pub rating: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub overview: fn(&str) -> String,
    pub meta: fn(&str) -> String,
    pub source: fn(&str) -> String,
    pub error: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp() // Fallback to default
            }
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().bold().to_string(),
            year: |s| s.bright_black().to_string(),
            rating: |s| s.yellow().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            overview: |s| s.white().to_string(),
            meta: |s| s.cyan().italic().to_string(),
            source: |s| s.cyan().to_string(),
            error: |s| s.red().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            title: |s| s.red().italic().bold().to_string(),
            year: |s| s.cyan().to_string(),
            rating: |s| s.bright_yellow().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            overview: |s| s.bright_white().to_string(),
            meta: |s| s.green().italic().to_string(),
            source: |s| s.green().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            year: |s| s.magenta().to_string(),
            rating: |s| s.red().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.cyan().to_string(),
            overview: |s| s.black().to_string(),
            meta: |s| s.bright_black().italic().to_string(),
            source: |s| s.bright_blue().to_string(),
            error: |s| s.red().to_string(),
        }
    }
}
