//! Line commands understood by the application shell.

mod commands;

use std::str::FromStr;

pub use commands::{execute, LOGIN_FALLBACK, REGISTER_FALLBACK};

use crate::forms::{LoginForm, RegistrationForm};

pub const HELP: &str = "\
commands:
  register <username> <email> <password> <confirm>
  login <username> <password>
  logout
  open <path>
  whoami
  get <path>
  help
  quit";

#[derive(Debug, Clone)]
pub enum Command {
    Register(RegistrationForm),
    Login(LoginForm),
    Logout,
    Open(String),
    WhoAmI,
    Get(String),
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::Login(_) => "login",
            Command::Logout => "logout",
            Command::Open(_) => "open",
            Command::WhoAmI => "whoami",
            Command::Get(_) => "get",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    /// Missing form fields parse as empty so validation can name them.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = parts.collect();
        let arg = |i: usize| args.get(i).copied().unwrap_or_default().to_string();
        let at_most = |n: usize| {
            if args.len() > n {
                Err(format!("too many arguments for '{}'\n{}", name, HELP))
            } else {
                Ok(())
            }
        };

        match name.to_lowercase().as_str() {
            "register" => {
                at_most(4)?;
                Ok(Command::Register(RegistrationForm {
                    username: arg(0),
                    email: arg(1),
                    password: arg(2),
                    confirm_password: arg(3),
                }))
            }
            "login" => {
                at_most(2)?;
                Ok(Command::Login(LoginForm::new(arg(0), arg(1))))
            }
            "logout" => at_most(0).map(|_| Command::Logout),
            "whoami" => at_most(0).map(|_| Command::WhoAmI),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "open" | "get" => {
                at_most(1)?;
                let path = args
                    .first()
                    .ok_or_else(|| format!("'{}' needs a path", name))?
                    .to_string();
                if name.eq_ignore_ascii_case("open") {
                    Ok(Command::Open(path))
                } else {
                    Ok(Command::Get(path))
                }
            }
            other => Err(format!("unknown command '{}'\n{}", other, HELP)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_with_missing_password() {
        match "login alice".parse::<Command>().unwrap() {
            Command::Login(form) => {
                assert_eq!(form.username, "alice");
                assert_eq!(form.password, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_register_fields_in_order() {
        let command: Command = "register alice alice@example.com secret1 secret1"
            .parse()
            .unwrap();
        match command {
            Command::Register(form) => {
                assert_eq!(form.email, "alice@example.com");
                assert_eq!(form.confirm_password, "secret1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn navigation_needs_a_path() {
        assert!(matches!(
            "OPEN /tasks".parse::<Command>(),
            Ok(Command::Open(path)) if path == "/tasks"
        ));
        assert!("get".parse::<Command>().is_err());
        assert!("open /a /b".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!("   ".parse::<Command>().is_err());
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.contains("unknown command 'dance'"));
        assert!(matches!("exit".parse::<Command>(), Ok(Command::Quit)));
    }
}
