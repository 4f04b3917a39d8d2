//! Command script parser
//!
//! One command per line. Blank lines and `#` comments are skipped.

use anyhow::{bail, Result};

/// A single scripted cache operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get { key: String },
    Peek { key: String },
    Del { key: String },
    Exists { key: String },
    Len,
    Keys,
    Clear,
    Stats,
}

impl Command {
    /// Parse one line; `Ok(None)` for blank and comment lines
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = split_word(line);
        let command = match verb.to_uppercase().as_str() {
            "PUT" | "SET" => {
                let (key, value) = split_word(rest);
                if key.is_empty() || value.is_empty() {
                    bail!("wrong number of arguments for 'put' command");
                }
                Command::Put {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "GET" => Command::Get {
                key: single_key("get", rest)?,
            },
            "PEEK" => Command::Peek {
                key: single_key("peek", rest)?,
            },
            "DEL" => Command::Del {
                key: single_key("del", rest)?,
            },
            "EXISTS" => Command::Exists {
                key: single_key("exists", rest)?,
            },
            "LEN" => no_args("len", rest, Command::Len)?,
            "KEYS" => no_args("keys", rest, Command::Keys)?,
            "CLEAR" => no_args("clear", rest, Command::Clear)?,
            "STATS" => no_args("stats", rest, Command::Stats)?,
            other => bail!("unknown command '{}'", other),
        };

        Ok(Some(command))
    }
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], s[pos..].trim()),
        None => (s, ""),
    }
}

fn single_key(name: &str, rest: &str) -> Result<String> {
    let (key, extra) = split_word(rest);
    if key.is_empty() || !extra.is_empty() {
        bail!("wrong number of arguments for '{}' command", name);
    }
    Ok(key.to_string())
}

fn no_args(name: &str, rest: &str, command: Command) -> Result<Command> {
    if !rest.is_empty() {
        bail!("wrong number of arguments for '{}' command", name);
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_with_spaces_in_value() {
        let cmd = Command::parse("put user:1  Ada Lovelace ").unwrap();
        assert_eq!(
            cmd,
            Some(Command::Put {
                key: "user:1".to_string(),
                value: "Ada Lovelace".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            Command::parse("GeT k").unwrap(),
            Some(Command::Get {
                key: "k".to_string()
            })
        );
        assert_eq!(Command::parse("stats").unwrap(), Some(Command::Stats));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# warm up").unwrap(), None);
    }

    #[test]
    fn test_parse_arity_errors() {
        assert!(Command::parse("put k").is_err());
        assert!(Command::parse("get").is_err());
        assert!(Command::parse("get a b").is_err());
        assert!(Command::parse("len 3").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("flush").unwrap_err();
        assert_eq!(err.to_string(), "unknown command 'FLUSH'");
    }
}
