use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refine,
    History,
    Key,
    Clear,
    Help,
    Exit,
    Unknown(String),
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_lowercase().as_str() {
            "" | "refine" | "r" => Command::Refine,
            "history" | "h" => Command::History,
            "key" => Command::Key,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            _ => Command::Unknown(s.to_string()),
        })
    }
}

pub const COMMAND_BOX: &str = "\
┌──────────────────────────────────────────┐\n\
│            Available Commands            │\n\
├──────────────────────────────────────────┤\n\
│  `refine`  - Fill in the form (or Enter) │\n\
├──────────────────────────────────────────┤\n\
│  `history` - Show the last 10 prompts    │\n\
├──────────────────────────────────────────┤\n\
│  `key`     - Enter your API key          │\n\
├──────────────────────────────────────────┤\n\
│  `clear`   - Clear the screen            │\n\
├──────────────────────────────────────────┤\n\
│  `exit`    - Quit the application        │\n\
└──────────────────────────────────────────┘";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!("".parse::<Command>(), Ok(Command::Refine));
        assert_eq!("  Refine ".parse::<Command>(), Ok(Command::Refine));
        assert_eq!("HISTORY".parse::<Command>(), Ok(Command::History));
        assert_eq!("key".parse::<Command>(), Ok(Command::Key));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Exit));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn keeps_unknown_input() {
        assert_eq!(
            "make it shorter".parse::<Command>(),
            Ok(Command::Unknown("make it shorter".to_string()))
        );
    }
}
