use clap::Args;
use serde_json::Value;

use pathfinder_core::value_realization::{self, TimelineInput};

use crate::input;

/// Arguments for a value-realization timeline
#[derive(Args)]
pub struct TimelineArgs {
    /// Path to JSON input file with both period series
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_timeline(args: TimelineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let timeline_input: TimelineInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file (or piped JSON) is required for a timeline".into());
    };

    let result = value_realization::build_timeline(&timeline_input)?;
    Ok(serde_json::to_value(result)?)
}
