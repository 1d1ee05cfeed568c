use crate::core::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// One user action against the build, as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// `place:CATEGORY:ID`
    Place { category: Category, id: String },
    /// `remove:CATEGORY`
    Remove(Category),
    /// `qty:CATEGORY:+1` or `qty:CATEGORY:-1`
    Quantity { category: Category, delta: i32 },
    /// `reset`
    Reset,
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let category = |raw: &str| raw.parse::<Category>().map_err(|e| e.to_string());

        match parts.as_slice() {
            ["place", cat, id] if !id.is_empty() => Ok(Gesture::Place {
                category: category(*cat)?,
                id: id.to_string(),
            }),
            ["remove", cat] => Ok(Gesture::Remove(category(*cat)?)),
            ["qty", cat, step] => {
                let delta = match *step {
                    "+1" | "1" | "+" => 1,
                    "-1" | "-" => -1,
                    _ => return Err(format!("Invalid quantity step: {step}. Use +1 or -1")),
                };
                Ok(Gesture::Quantity {
                    category: category(*cat)?,
                    delta,
                })
            }
            ["reset"] => Ok(Gesture::Reset),
            _ => Err(format!(
                "Invalid gesture: {s}. Use place:CATEGORY:ID, remove:CATEGORY, qty:CATEGORY:+1|-1 or reset"
            )),
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gesture::Place { category, id } => write!(f, "place:{category}:{id}"),
            Gesture::Remove(category) => write!(f, "remove:{category}"),
            Gesture::Quantity { category, delta } => write!(f, "qty:{category}:{delta:+}"),
            Gesture::Reset => write!(f, "reset"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rig-builder", about = "Assemble a custom PC and request a quote")]
pub struct Opt {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "catalog", about = "List available parts by category")]
    Catalog {
        #[arg(long, help = "Only show parts whose name or brand contains TERM")]
        search: Option<String>,
        #[arg(long, help = "Fetch the live storefront catalog first")]
        live: bool,
    },
    #[command(name = "quote", about = "Replay gestures against a new build and print the bill")]
    Quote {
        #[arg(help = "Gestures in order: place:CATEGORY:ID, remove:CATEGORY, qty:CATEGORY:+1|-1, reset")]
        gestures: Vec<Gesture>,
        #[arg(long, help = "Also require the motherboard to fit the case")]
        strict: bool,
        #[arg(long, help = "Fetch the live storefront catalog first")]
        live: bool,
        #[arg(long, help = "Print the messaging deep link for the quote")]
        link: bool,
        #[arg(long, help = "Print the quote snapshot as JSON")]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_parsing() {
        assert_eq!(
            "place:cpu:c4".parse::<Gesture>().unwrap(),
            Gesture::Place {
                category: Category::Cpu,
                id: "c4".to_string()
            }
        );
        assert_eq!(
            "qty:ram:+1".parse::<Gesture>().unwrap(),
            Gesture::Quantity {
                category: Category::Memory,
                delta: 1
            }
        );
        assert_eq!(
            "remove:psu".parse::<Gesture>().unwrap(),
            Gesture::Remove(Category::Psu)
        );
        assert_eq!("reset".parse::<Gesture>().unwrap(), Gesture::Reset);
    }

    #[test]
    fn test_invalid_gestures() {
        assert!("place:cpu".parse::<Gesture>().is_err());
        assert!("place:cpu:".parse::<Gesture>().is_err());
        assert!("qty:memory:+2".parse::<Gesture>().is_err());
        assert!("remove:monitor".parse::<Gesture>().is_err());
        assert!("explode".parse::<Gesture>().is_err());
    }

    #[test]
    fn test_gesture_display_round_trips() {
        for raw in ["place:gpu:g1", "remove:case", "qty:storage:-1", "reset"] {
            assert_eq!(raw.parse::<Gesture>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_cli_parses_quote_command() {
        let opt = Opt::try_parse_from([
            "rig-builder",
            "quote",
            "place:cpu:c4",
            "qty:cpu:-1",
            "--strict",
        ])
        .unwrap();
        match opt.command {
            Command::Quote {
                gestures, strict, ..
            } => {
                assert_eq!(gestures.len(), 2);
                assert!(strict);
            }
            _ => panic!("expected quote command"),
        }
    }
}
