use super::load;
use crate::cli::TreeArgs;
use crate::error::Result;
use std::io::Write;
use tracing::info;

pub fn run(args: TreeArgs, out: &mut impl Write) -> Result<()> {
    let root = load(&args)?;
    let counts = root.counts();
    info!("Aggregated counts: {}", counts);

    writeln!(out, "molecules: {}", counts.molecules)?;
    writeln!(out, "atoms:     {}", counts.atoms)?;
    writeln!(out, "bonds:     {}", counts.bonds)?;
    Ok(())
}
