//! Line commands read from stdin.

use thiserror::Error;

use marquee_core::query::{decade_presets, FilterIntent, YearRange, GENRES};

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{command}' does not understand '{value}'")]
    InvalidArgument { command: &'static str, value: String },
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A filter transition handed to the controller.
    Intent(FilterIntent),
    Favorite(u32),
    Trailer(u32),
    Random,
    Genres,
    Show,
    Config,
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <text>        search by title (empty text returns to discover)
  genre <id|name|none> filter by genre
  rating <0-10>        minimum average rating
  years <start> <end>  release year range
  decade <label>       All, 70s, 80s, 90s, 2000s, 2010s, 2020s
  page <n>             jump to a page
  next | prev          move one page
  fav <id>             toggle a favorite
  favorites            show or leave the favorites view
  reset                restore the default filters
  trailer <id>         find a movie's trailer
  random               pick a random movie on screen
  genres               list the browseable genres
  show                 redraw the current view
  config               print the active configuration
  stats                print metrics
  help                 this text
  quit                 exit";

impl Command {
    /// Parse one input line. `default_years` backs the "All" decade.
    ///
    /// Blank lines parse to `None`.
    pub fn parse(line: &str, default_years: YearRange) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "search" | "s" => Command::Intent(FilterIntent::Search(rest.to_string())),
            "genre" | "g" => Command::Intent(FilterIntent::SelectGenre(parse_genre(rest)?)),
            "rating" | "r" => {
                let rating = parse_arg::<f32>("rating", rest, "a number from 0 to 10")?;
                Command::Intent(FilterIntent::SetMinRating(rating))
            }
            "years" | "y" => {
                let mut parts = rest.split_whitespace();
                let start = parse_arg::<i32>("years", parts.next().unwrap_or(""), "two years")?;
                let end = parse_arg::<i32>("years", parts.next().unwrap_or(""), "two years")?;
                Command::Intent(FilterIntent::SetYearRange { start, end })
            }
            "decade" | "d" => {
                let range = parse_decade(rest, default_years)?;
                Command::Intent(FilterIntent::SetYearRange {
                    start: range.start(),
                    end: range.end(),
                })
            }
            "page" | "p" => {
                let page = parse_arg::<i64>("page", rest, "a page number")?;
                Command::Intent(FilterIntent::GoToPage(page))
            }
            "next" | "n" => Command::Intent(FilterIntent::NextPage),
            "prev" | "previous" => Command::Intent(FilterIntent::PreviousPage),
            "favorites" | "favs" => Command::Intent(FilterIntent::ToggleFavoritesView),
            "reset" => Command::Intent(FilterIntent::ResetFilters),
            "fav" | "f" => Command::Favorite(parse_arg("fav", rest, "a movie id")?),
            "trailer" | "t" => Command::Trailer(parse_arg("trailer", rest, "a movie id")?),
            "random" => Command::Random,
            "genres" => Command::Genres,
            "show" | "ls" => Command::Show,
            "config" => Command::Config,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Metric label.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Intent(intent) => match intent {
                FilterIntent::Search(_) => "search",
                FilterIntent::SelectGenre(_) => "genre",
                FilterIntent::SetMinRating(_) => "rating",
                FilterIntent::SetYearRange { .. } => "years",
                FilterIntent::GoToPage(_) => "page",
                FilterIntent::NextPage => "next",
                FilterIntent::PreviousPage => "prev",
                FilterIntent::ToggleFavoritesView => "favorites",
                FilterIntent::ResetFilters => "reset",
            },
            Command::Favorite(_) => "fav",
            Command::Trailer(_) => "trailer",
            Command::Random => "random",
            Command::Genres => "genres",
            Command::Show => "show",
            Command::Config => "config",
            Command::Stats => "stats",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

fn parse_arg<T: std::str::FromStr>(
    command: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    })
}

fn parse_genre(value: &str) -> Result<Option<u32>, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "genre",
            expected: "a genre id, a genre name or 'none'",
        });
    }
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    if let Ok(id) = value.parse::<u32>() {
        return Ok(Some(id));
    }
    GENRES
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(value))
        .map(|g| Some(g.id))
        .ok_or_else(|| CommandError::InvalidArgument {
            command: "genre",
            value: value.to_string(),
        })
}

fn parse_decade(value: &str, default_years: YearRange) -> Result<YearRange, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "decade",
            expected: "a decade label",
        });
    }
    if value.eq_ignore_ascii_case("all") {
        return Ok(default_years);
    }
    decade_presets(default_years.end())
        .into_iter()
        .find(|d| d.label.eq_ignore_ascii_case(value))
        .map(|d| YearRange::normalized(d.start, d.end))
        .ok_or_else(|| CommandError::InvalidArgument {
            command: "decade",
            value: value.to_string(),
        })
}
