use std::env;

pub const USAGE: &str = "usage: w2v_check [--config PATH] [--json]";

/// Options shared by the command line tools.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    /// Path passed with `--config`.
    pub config: Option<String>,
    /// `--json` prints machine-readable reports.
    pub json: bool,
}

/// Parses command line arguments (without the binary name).
///
/// Unknown flags, stray arguments and a `--config` without a path are errors.
pub fn parse_cli<I>(mut args: I) -> Result<CliArgs, String>
where
    I: Iterator<Item = String>,
{
    let mut out = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) if !path.starts_with("--") => out.config = Some(path),
                _ => return Err("--config needs a path".to_string()),
            },
            "--json" => out.json = true,
            _ if arg.starts_with('-') => return Err(format!("unknown option {arg}")),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }
    Ok(out)
}

/// Convenience wrapper that parses arguments from the current process
/// (skipping the binary name).
pub fn parse_env() -> Result<CliArgs, String> {
    parse_cli(env::args().skip(1))
}
