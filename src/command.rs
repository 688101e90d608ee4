#![allow(missing_docs)]

use crate::error::{EaipError, Result};

/// Usage text shown for malformed commands.
pub const USAGE: &str = "\
eaip <ICAO>: list charts as a rendered picture
eaip <ICAO> --raw: list charts as text
eaip <ICAO> <chart-type|runway>: list charts of one type or runway
eaip <ICAO> -s <id>: show the chart with the given index id
eaip <ICAO> -c <code>: show the chart with the given code
eaip <ICAO> -f <keyword>: list charts whose filename contains the keyword
eaip set <period>: switch the AIRAC cycle (admin only)";

/// A parsed `eaip` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EaipCommand {
    /// `eaip set <period>` — switch the AIRAC cycle. Admin only.
    SetPeriod { period: String },
    /// `eaip <ICAO> [--raw] [<chart-type|runway>]` — list charts.
    Query {
        icao: String,
        raw: bool,
        search: Option<String>,
    },
    /// `eaip <ICAO> -s <id>` — show one chart by index id.
    Select { icao: String, doc_id: String },
    /// `eaip <ICAO> -c <code>` — show one chart by code.
    ByCode { icao: String, code: String },
    /// `eaip <ICAO> -f <keyword>` — list charts by filename keyword.
    ByFilename {
        icao: String,
        keyword: String,
        raw: bool,
    },
}

impl EaipCommand {
    /// Parse the argument text following the `eaip` command word.
    pub fn parse(input: &str) -> Result<Self> {
        let args = split_args(input)?;
        if args.is_empty() {
            return Err(EaipError::Command("ICAO code required".to_string()));
        }

        if args[0] == "set" {
            if args.len() != 2 {
                return Err(EaipError::Command("usage: eaip set <period>".to_string()));
            }
            return Ok(EaipCommand::SetPeriod {
                period: args[1].clone(),
            });
        }

        let icao = args[0].to_uppercase();
        let raw = args.iter().any(|arg| arg == "--raw");
        let args: Vec<&String> = args.iter().filter(|arg| arg.as_str() != "--raw").collect();

        match args.get(1).map(|arg| arg.as_str()) {
            None => Ok(EaipCommand::Query {
                icao,
                raw,
                search: None,
            }),
            Some("-s") => {
                let doc_id = args
                    .get(2)
                    .ok_or_else(|| EaipError::Command("chart id required".to_string()))?;
                Ok(EaipCommand::Select {
                    icao,
                    doc_id: (*doc_id).clone(),
                })
            }
            Some("-c") => {
                let code = args
                    .get(2)
                    .ok_or_else(|| EaipError::Command("chart code required".to_string()))?;
                Ok(EaipCommand::ByCode {
                    icao,
                    code: code.to_uppercase(),
                })
            }
            Some("-f") => {
                let keyword = args
                    .get(2)
                    .ok_or_else(|| EaipError::Command("search keyword required".to_string()))?;
                Ok(EaipCommand::ByFilename {
                    icao,
                    keyword: (*keyword).clone(),
                    raw,
                })
            }
            Some(term) => Ok(EaipCommand::Query {
                icao,
                raw,
                search: Some(term.to_uppercase()),
            }),
        }
    }
}

/// Shell-style token splitting. Quotes group multi-word chart types such
/// as `"WAYPOINT LIST"`; no escape handling beyond that.
fn split_args(input: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut has_token = false;

    for c in input.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    has_token = true;
                }
                c if c.is_whitespace() => {
                    if has_token {
                        args.push(std::mem::take(&mut current));
                        has_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    has_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(EaipError::Command("unclosed quote".to_string()));
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_query() {
        assert_eq!(
            EaipCommand::parse("zbaa").unwrap(),
            EaipCommand::Query {
                icao: "ZBAA".to_string(),
                raw: false,
                search: None,
            }
        );
    }

    #[test]
    fn test_parse_raw_flag_any_position() {
        let expected = EaipCommand::Query {
            icao: "ZBAA".to_string(),
            raw: true,
            search: Some("SID".to_string()),
        };
        assert_eq!(EaipCommand::parse("ZBAA --raw sid").unwrap(), expected);
        assert_eq!(EaipCommand::parse("ZBAA sid --raw").unwrap(), expected);
    }

    #[test]
    fn test_parse_quoted_chart_type() {
        assert_eq!(
            EaipCommand::parse("ZBAA \"waypoint list\"").unwrap(),
            EaipCommand::Query {
                icao: "ZBAA".to_string(),
                raw: false,
                search: Some("WAYPOINT LIST".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_selection_and_code_and_filename() {
        assert_eq!(
            EaipCommand::parse("ZBAA -s 12").unwrap(),
            EaipCommand::Select {
                icao: "ZBAA".to_string(),
                doc_id: "12".to_string(),
            }
        );
        assert_eq!(
            EaipCommand::parse("ZBAA -c 7a03-").unwrap(),
            EaipCommand::ByCode {
                icao: "ZBAA".to_string(),
                code: "7A03-".to_string(),
            }
        );
        assert_eq!(
            EaipCommand::parse("ZBAA -f ils").unwrap(),
            EaipCommand::ByFilename {
                icao: "ZBAA".to_string(),
                keyword: "ils".to_string(),
                raw: false,
            }
        );
    }

    #[test]
    fn test_parse_set_period() {
        assert_eq!(
            EaipCommand::parse("set 2505").unwrap(),
            EaipCommand::SetPeriod {
                period: "2505".to_string(),
            }
        );
        assert!(EaipCommand::parse("set").is_err());
        assert!(EaipCommand::parse("set 2505 extra").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            EaipCommand::parse(""),
            Err(EaipError::Command(_))
        ));
        assert!(EaipCommand::parse("ZBAA -s").is_err());
        assert!(EaipCommand::parse("ZBAA -c").is_err());
        assert!(EaipCommand::parse("ZBAA -f").is_err());
        assert!(EaipCommand::parse("ZBAA \"unclosed").is_err());
    }
}
