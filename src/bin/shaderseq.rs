use std::str::FromStr;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand, ValueEnum};

use shaderseq::{
    Clip, DragSnapshot, Keyframe, ResizeHandle, ResizeMode, TimeConstraints, interpolate,
    validate_keyframes,
};

#[derive(Parser, Debug)]
#[command(name = "shaderseq", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one clip-resize step and print the outcome as JSON.
    Resize(ResizeArgs),
    /// Sample a keyframe list at a given time.
    Sample(SampleArgs),
    /// Check ordering and spacing of a keyframe list.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct ResizeArgs {
    /// Clip start time in seconds.
    #[arg(long)]
    start: f64,

    /// Clip duration in seconds.
    #[arg(long)]
    duration: f64,

    /// Keyframe as `parameter:time:value` (clip-relative time). Repeatable.
    #[arg(long = "key")]
    keys: Vec<NamedKey>,

    /// Edge being dragged.
    #[arg(long, value_enum)]
    handle: HandleChoice,

    /// Pointer position in timeline seconds.
    #[arg(long)]
    to: f64,

    /// Scale keyframes with the clip instead of keeping their absolute position.
    #[arg(long, default_value_t = false)]
    proportional: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Keyframe as `time:value`. Repeatable.
    #[arg(long = "key")]
    keys: Vec<TimeValue>,

    /// Clip-relative sample time in seconds.
    #[arg(long)]
    at: f64,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Keyframe as `time:value`, in the given order. Repeatable.
    #[arg(long = "key")]
    keys: Vec<TimeValue>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HandleChoice {
    Left,
    Right,
}

impl From<HandleChoice> for ResizeHandle {
    fn from(v: HandleChoice) -> Self {
        match v {
            HandleChoice::Left => Self::Left,
            HandleChoice::Right => Self::Right,
        }
    }
}

#[derive(Clone, Debug)]
struct NamedKey {
    parameter: String,
    key: Keyframe,
}

#[derive(Clone, Copy, Debug)]
struct TimeValue(Keyframe);

fn parse_f64(s: &str, what: &str) -> anyhow::Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("invalid {what} '{s}'"))
}

impl FromStr for TimeValue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((t, v)) = s.split_once(':') else {
            bail!("expected time:value, got '{s}'");
        };
        Ok(Self(Keyframe::new(parse_f64(t, "time")?, parse_f64(v, "value")?)))
    }
}

impl FromStr for NamedKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((parameter, rest)) = s.split_once(':') else {
            bail!("expected parameter:time:value, got '{s}'");
        };
        if parameter.trim().is_empty() {
            bail!("empty parameter name in '{s}'");
        }
        let TimeValue(key) = rest.parse()?;
        Ok(Self {
            parameter: parameter.trim().to_string(),
            key,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Resize(args) => cmd_resize(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn cmd_resize(args: ResizeArgs) -> anyhow::Result<()> {
    let mut clip = Clip::new("cli", args.start, args.duration, Default::default());
    for k in &args.keys {
        clip.automation
            .add_keyframe_within(
                &k.parameter,
                k.key.time,
                k.key.value,
                TimeConstraints::new(0.0, clip.duration),
            )
            .with_context(|| format!("add keyframe '{}' at {}s", k.parameter, k.key.time))?;
    }

    let snapshot = DragSnapshot::capture(&clip, args.handle.into());
    let outcome = snapshot.resize(args.to, ResizeMode::from_modifier(args.proportional));

    let json = serde_json::to_string_pretty(&outcome).context("serialize resize outcome")?;
    println!("{json}");
    Ok(())
}

fn sorted(keys: &[TimeValue]) -> Vec<Keyframe> {
    let mut out: Vec<Keyframe> = keys.iter().map(|k| k.0).collect();
    out.sort_by(|a, b| a.time.total_cmp(&b.time));
    out
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    println!("{}", interpolate(&sorted(&args.keys), args.at));
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let keys: Vec<Keyframe> = args.keys.iter().map(|k| k.0).collect();
    let report = validate_keyframes(&keys);
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    println!("{json}");
    if !report.valid {
        bail!("{} keyframe problem(s)", report.errors.len());
    }
    Ok(())
}
