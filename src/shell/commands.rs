//! Shell command parsing.

use crate::vitals::VitalsField;

pub const HELP: &str = "\
Commands:
  set <field> <value>   edit a field (age, spo2, hr, bp, symptoms)
  url <server-url>      edit the server URL
  test                  test the connection to the server URL
  analyze               validate and submit the vitals
  clear                 clear the form and the last result
  show                  show the form, server and result
  help                  show this help
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(VitalsField, String),
    Url(String),
    Test,
    Analyze,
    Clear,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = VitalsField::from_name(name)
                .ok_or_else(|| format!("unknown field: {}", name))?;
            Command::Set(field, value.to_string())
        }
        "url" => Command::Url(rest.to_string()),
        "test" => Command::Test,
        "analyze" | "analyse" => Command::Analyze,
        "clear" => Command::Clear,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {} (try 'help')", other)),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse_command("set symptoms cough,  fever ").unwrap(),
            Some(Command::Set(VitalsField::Symptoms, "cough,  fever".to_string()))
        );
        assert_eq!(
            parse_command("SET hr 80").unwrap(),
            Some(Command::Set(VitalsField::HeartRate, "80".to_string()))
        );
        assert_eq!(
            parse_command("set bp").unwrap(),
            Some(Command::Set(VitalsField::BloodPressure, String::new()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(parse_command("test").unwrap(), Some(Command::Test));
        assert_eq!(parse_command("analyze").unwrap(), Some(Command::Analyze));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert_eq!(
            parse_command("url http://10.0.0.2:5000").unwrap(),
            Some(Command::Url("http://10.0.0.2:5000".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("set").is_err());
        assert!(parse_command("set weight 70").is_err());
        assert!(parse_command("predict").is_err());
    }
}
