use respic::{Engine, EngineConfig, SourceStrategy, VariantRegistry};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Respic(respic::Error),
    Json(serde_json::Error),
    BadRegister(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Respic(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::BadRegister(spec) => {
                write!(f, "invalid --register value (expected IMAGE:NAME:WIDTH:URL): {spec}")
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<respic::Error> for CliError {
    fn from(value: respic::Error) -> Self {
        Self::Respic(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Rewrite,
    Parse,
    Resolve,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    candidates: Option<String>,
    sizes: Option<String>,
    registrations: Vec<(u64, String, u32, String)>,
    image: Option<u64>,
    margin: Option<u32>,
    config: Option<String>,
    pretty: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "respic-cli\n\
\n\
USAGE:\n\
  respic-cli [rewrite] (--candidates <list> | --sizes <list> --image <id>) [--register IMAGE:NAME:WIDTH:URL ...] [--margin <px>] [--config <path>] [--out <path>] [<path>|-]\n\
  respic-cli parse [--pretty] [--out <path>] [<path>|-]\n\
  respic-cli resolve (--candidates <list> | --sizes <list> --image <id>) [--register IMAGE:NAME:WIDTH:URL ...] [--margin <px>] [--config <path>] [--pretty] [--out <path>]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - rewrite reads an HTML fragment as input and prints the rewritten fragment.\n\
  - parse reads a candidate list as input and prints width-sorted variants as JSON.\n\
  - resolve prints the resolved (condition, variant) pairs as JSON.\n\
  - --candidates selects the derived strategy; --sizes selects the explicit one.\n\
  - --register populates the per-invocation variant registry for --sizes lookups.\n\
  - Flags that do not apply to the selected command are rejected.\n\
"
}

fn parse_register_spec(spec: &str) -> Result<(u64, String, u32, String), CliError> {
    let bad = || CliError::BadRegister(spec.to_string());
    let mut parts = spec.splitn(4, ':');
    let image = parts
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(bad)?;
    let name = parts.next().filter(|s| !s.is_empty()).ok_or_else(bad)?;
    let width = parts
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(bad)?;
    let url = parts.next().filter(|s| !s.is_empty()).ok_or_else(bad)?;
    Ok((image, name.to_string(), width, url.to_string()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "rewrite" => args.command = Command::Rewrite,
            "parse" => args.command = Command::Parse,
            "resolve" => args.command = Command::Resolve,
            "--pretty" => args.pretty = true,
            "--candidates" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.candidates = Some(v.clone());
            }
            "--sizes" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.sizes = Some(v.clone());
            }
            "--register" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.registrations.push(parse_register_spec(v)?);
            }
            "--image" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.image = Some(v.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--margin" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.margin = Some(v.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(v.clone());
            }
            "--out" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(v.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
            }
            other => {
                if other.starts_with("--") {
                    return Err(CliError::Usage(usage()));
                }
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    // Strategy and engine flags belong to the commands that consume them;
    // silently ignoring them would hide caller mistakes.
    match args.command {
        Command::Parse => {
            if args.candidates.is_some()
                || args.sizes.is_some()
                || !args.registrations.is_empty()
                || args.image.is_some()
                || args.margin.is_some()
                || args.config.is_some()
            {
                return Err(CliError::Usage(usage()));
            }
        }
        Command::Resolve => {
            if args.input.is_some() {
                return Err(CliError::Usage(usage()));
            }
        }
        Command::Rewrite => {
            if args.pretty {
                return Err(CliError::Usage(usage()));
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
    out: Option<&str>,
) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_text(&text, out)
}

fn build_engine(args: &Args) -> Result<Engine, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => EngineConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(margin) = args.margin {
        config.breakpoint_margin = margin;
    }
    Ok(Engine::with_config(config))
}

fn build_registry(args: &Args) -> VariantRegistry {
    let mut registry = VariantRegistry::new();
    for (image, name, width, url) in &args.registrations {
        registry.register(*image, name, url.clone(), *width);
    }
    registry
}

fn strategy<'a>(
    args: &'a Args,
    registry: &'a VariantRegistry,
) -> Result<SourceStrategy<'a>, CliError> {
    match (args.candidates.as_deref(), args.sizes.as_deref()) {
        (Some(candidates), None) => Ok(SourceStrategy::Derived { candidates }),
        (None, Some(sizes)) => {
            let Some(image) = args.image else {
                return Err(CliError::Usage(usage()));
            };
            Ok(SourceStrategy::Explicit {
                sizes,
                registry,
                image,
            })
        }
        _ => Err(CliError::Usage(usage())),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Parse => {
            let raw = read_input(args.input.as_deref())?;
            let variants = Engine::new().ingest_candidate_list(&raw);
            write_json(&variants, args.pretty, args.out.as_deref())
        }
        Command::Resolve => {
            let engine = build_engine(&args)?;
            let registry = build_registry(&args);
            let sources = engine.resolve_sources(strategy(&args, &registry)?);
            write_json(&sources, args.pretty, args.out.as_deref())
        }
        Command::Rewrite => {
            let engine = build_engine(&args)?;
            let registry = build_registry(&args);
            let html = read_input(args.input.as_deref())?;
            let rewritten = engine.rewrite_fragment(&html, strategy(&args, &registry)?);
            write_text(&rewritten, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
