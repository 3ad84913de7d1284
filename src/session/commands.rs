use anyhow::Result;

#[derive(Clone, Copy, Debug)]
pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub help: &'static str,
}

impl CommandDef {
    fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }
}

pub fn command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "pwd",
            aliases: &[],
            usage: "pwd",
            help: "Print the current directory",
        },
        CommandDef {
            name: "ls",
            aliases: &[],
            usage: "ls [-r|--recursive] [path]",
            help: "List a directory (fetches as it goes)",
        },
        CommandDef {
            name: "cd",
            aliases: &[],
            usage: "cd <path>",
            help: "Change directory (`-` returns to the previous one)",
        },
        CommandDef {
            name: "select",
            aliases: &[],
            usage: "select [path]",
            help: "Choose a directory and finish",
        },
        CommandDef {
            name: "exit",
            aliases: &["quit"],
            usage: "exit",
            help: "Leave without choosing",
        },
        CommandDef {
            name: "help",
            aliases: &["?"],
            usage: "help",
            help: "Show commands",
        },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Pwd,
    Ls { path: Option<String>, recursive: bool },
    Cd { path: String },
    Select { path: Option<String> },
    Exit,
    Help,
}

impl Command {
    /// Parses already tokenized input; the error message is meant for the user.
    pub fn parse(tokens: &[String]) -> Result<Command> {
        let Some((word, args)) = tokens.split_first() else {
            anyhow::bail!("empty command");
        };
        let defs = command_defs();
        let Some(def) = defs.iter().find(|d| d.matches(word)) else {
            anyhow::bail!("unknown command `{}` (try `help`)", word);
        };

        let usage = || anyhow::anyhow!("usage: {}", def.usage);
        let cmd = match def.name {
            "pwd" => {
                no_args(args).map_err(|_| usage())?;
                Command::Pwd
            }
            "ls" => {
                let mut path = None;
                let mut recursive = false;
                for arg in args {
                    match arg.as_str() {
                        "-r" | "--recursive" => recursive = true,
                        _ if path.is_none() => path = Some(arg.clone()),
                        _ => return Err(usage()),
                    }
                }
                Command::Ls { path, recursive }
            }
            "cd" => match args {
                [path] => Command::Cd { path: path.clone() },
                _ => return Err(usage()),
            },
            "select" => match args {
                [] => Command::Select { path: None },
                [path] => Command::Select {
                    path: Some(path.clone()),
                },
                _ => return Err(usage()),
            },
            "exit" => {
                no_args(args).map_err(|_| usage())?;
                Command::Exit
            }
            _ => Command::Help,
        };
        Ok(cmd)
    }
}

fn no_args(args: &[String]) -> Result<()> {
    if !args.is_empty() {
        anyhow::bail!("unexpected arguments");
    }
    Ok(())
}
