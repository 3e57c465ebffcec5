//! Plain-text parameter file format
//!
//! Whitespace-separated values, read in this order:
//!
//! ```text
//! seed
//! stop_time
//! ew_green ew_yellow
//! ns_green ns_yellow
//! east_mean east_std_dev
//! west_mean west_std_dev
//! north_mean north_std_dev
//! south_mean south_std_dev
//! yellow_advance_percent
//! ```
//!
//! Line breaks are not significant. `#` starts a comment running to the
//! end of the line. Parsing stops at the first missing or unreadable
//! value; range checks are then applied to the whole configuration.

use super::{ConfigError, SimulationConfig};
use crate::arrivals::ArrivalConfig;
use std::str::FromStr;

/// Whitespace token with the 1-based line it came from
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let inner = input.lines().enumerate().flat_map(|(idx, line)| {
            let content = line.split('#').next().unwrap_or("");
            content.split_whitespace().map(move |token| (idx + 1, token))
        });
        Self {
            inner: Box::new(inner),
            last_line: 1,
        }
    }

    fn next_value<T>(&mut self, field: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let (line, token) = self.inner.next().ok_or(ConfigError::Parse {
            line: self.last_line,
            field,
            reason: "unexpected end of file".to_string(),
        })?;
        self.last_line = line;

        token.parse::<T>().map_err(|e| ConfigError::Parse {
            line,
            field,
            reason: format!("{:?}: {}", token, e),
        })
    }
}

/// Parse a parameter file's contents into a validated configuration
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::config::parse_params;
///
/// let config = parse_params("1\n100\n10 3\n10 3\n5 0\n5 0\n1000 0\n1000 0\n0\n").unwrap();
/// assert_eq!(config.stop_time, 100);
/// assert_eq!(config.north.mean, 1000.0);
/// ```
pub fn parse_params(input: &str) -> Result<SimulationConfig, ConfigError> {
    let mut tokens = Tokens::new(input);

    let seed: i64 = tokens.next_value("random generator seed")?;
    let stop_time = tokens.next_value("simulation end time")?;
    let ew_green = tokens.next_value("east-west green time")?;
    let ew_yellow = tokens.next_value("east-west yellow time")?;
    let ns_green = tokens.next_value("north-south green time")?;
    let ns_yellow = tokens.next_value("north-south yellow time")?;
    let east = read_arrival(&mut tokens, "east arrival distribution")?;
    let west = read_arrival(&mut tokens, "west arrival distribution")?;
    let north = read_arrival(&mut tokens, "north arrival distribution")?;
    let south = read_arrival(&mut tokens, "south arrival distribution")?;
    let yellow_advance_percent = tokens.next_value("percentage yellow advance")?;

    let seed_problem = u64::try_from(seed)
        .err()
        .map(|_| format!("seed must be >= 0 (got {})", seed));

    let config = SimulationConfig {
        seed: seed.max(0) as u64,
        stop_time,
        ew_green,
        ew_yellow,
        ns_green,
        ns_yellow,
        east,
        west,
        north,
        south,
        yellow_advance_percent,
    };

    // A negative seed is reported alongside the range checks
    let mut problems: Vec<String> = seed_problem.into_iter().collect();
    problems.extend(config.problems());
    if problems.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Invalid(problems))
    }
}

fn read_arrival(tokens: &mut Tokens<'_>, field: &'static str) -> Result<ArrivalConfig, ConfigError> {
    let mean = tokens.next_value(field)?;
    let std_dev = tokens.next_value(field)?;
    Ok(ArrivalConfig::new(mean, std_dev))
}

/// Render a configuration in the parameter file format
pub fn to_params(config: &SimulationConfig) -> String {
    format!(
        "{}\n{}\n{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n{}\n",
        config.seed,
        config.stop_time,
        config.ew_green,
        config.ew_yellow,
        config.ns_green,
        config.ns_yellow,
        config.east.mean,
        config.east.std_dev,
        config.west.mean,
        config.west.std_dev,
        config.north.mean,
        config.north.std_dev,
        config.south.mean,
        config.south.std_dev,
        config.yellow_advance_percent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_layout_ignored() {
        let input = "# seed\n7 250 # stop\n12 4 9 2\n6 1.5 6 1.5\n20 3 20 3\n75\n";
        let config = parse_params(input).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.stop_time, 250);
        assert_eq!(config.ns_green, 9);
        assert_eq!(config.west.std_dev, 1.5);
        assert_eq!(config.yellow_advance_percent, 75);
    }

    #[test]
    fn test_truncated_file_names_missing_field() {
        let err = parse_params("1\n100\n10 3\n").unwrap_err();
        match err {
            ConfigError::Parse { field, .. } => assert_eq!(field, "north-south green time"),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_token_reports_line() {
        let err = parse_params("1\n100\nten 3\n").unwrap_err();
        match err {
            ConfigError::Parse { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "east-west green time");
            }
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_seed_rejected() {
        let err = parse_params("-4 100 10 3 10 3 5 0 5 0 5 0 5 0 50").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_seed_reported_with_other_problems() {
        let err = parse_params("-4 100 0 3 10 3 5 0 5 0 5 0 5 0 101").unwrap_err();
        match err {
            ConfigError::Invalid(problems) => {
                assert_eq!(problems.len(), 3);
                assert_eq!(problems[0], "seed must be >= 0 (got -4)");
                assert!(problems[1].contains("ew_green"));
                assert!(problems[2].contains("yellow_advance_percent"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_to_params_round_trips_example() {
        let config = SimulationConfig::example();
        assert_eq!(parse_params(&to_params(&config)).unwrap(), config);
    }
}
