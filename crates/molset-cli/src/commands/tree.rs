use super::load;
use crate::cli::TreeArgs;
use crate::error::Result;
use molset::core::models::set::MoleculeSet;
use std::io::Write;

const INDENT: &str = "  ";

pub fn run(args: TreeArgs, out: &mut impl Write) -> Result<()> {
    let root = load(&args)?;
    render(&root, out)
}

/// Writes one line per set, indented by depth, in depth-first pre-order.
pub fn render(root: &MoleculeSet, out: &mut impl Write) -> Result<()> {
    for (depth, set, counts) in root.walk_with_counts() {
        let ids: Vec<String> = set.molecules().iter().map(|m| m.id().to_string()).collect();

        write!(
            out,
            "{}{} ({})",
            INDENT.repeat(depth),
            set.label().unwrap_or("<unlabelled>"),
            counts
        )?;
        if ids.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, " ids=[{}]", ids.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{SAMPLE_TREE, write_tree};

    #[test]
    fn renders_each_set_with_subtree_counts_and_ids() {
        let file = write_tree(SAMPLE_TREE);
        let args = TreeArgs {
            input: file.path().to_path_buf(),
            first_id: 10,
        };

        let mut out = Vec::new();
        run(args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = "\
system (3 molecules, 9 atoms, 6 bonds) ids=[10]
  solvent (2 molecules, 6 atoms, 4 bonds) ids=[11, 12]
  <unlabelled> (0 molecules, 0 atoms, 0 bonds)
";
        assert_eq!(text, expected);
    }
}
