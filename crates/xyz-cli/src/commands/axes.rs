use std::error::Error;

use clap::Args;
use xyz_core::AxisType;

#[derive(Args, Debug)]
pub struct AxesArgs {
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &AxesArgs) -> Result<(), Box<dyn Error>> {
    if args.json {
        let table: Vec<_> = AxisType::ALL
            .iter()
            .map(|kind| serde_json::json!({ "index": kind.wire_index(), "type": kind.label() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }
    for kind in AxisType::ALL {
        println!("{:>2}  {}", kind.wire_index(), kind.label());
    }
    Ok(())
}
