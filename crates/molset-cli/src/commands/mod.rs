pub mod count;
pub mod tree;

use crate::cli::TreeArgs;
use crate::error::Result;
use molset::core::io::tree::TreeFile;
use molset::core::models::sequence::IdSequence;
use molset::core::models::set::MoleculeSet;
use std::sync::Arc;
use tracing::info;

/// Reads the tree file named by `args` and builds it with a fresh identifier sequence.
fn load(args: &TreeArgs) -> Result<MoleculeSet> {
    info!("Loading molecule-set tree from {:?}", &args.input);
    let tree = TreeFile::read_from_path(&args.input)?;
    let sequence = Arc::new(IdSequence::starting_at(args.first_id));
    Ok(tree.build(sequence)?)
}
