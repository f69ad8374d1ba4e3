use std::path::PathBuf;

use clap::Parser;
use p3d_merge::MergeConfig;

#[derive(Parser, Debug)]
#[command(
    name = "p3dtool",
    about = "Merge Pure3D (P3D) files into one",
    version,
    after_help = "Examples:\n  p3dtool -s -i input/file1.p3d -i input/file2.p3d -o output/file.p3d\n  p3dtool -c --no-history -i input/file.p3d -o output/file.p3d"
)]
pub struct Cli {
    /// Input P3D file. Repeat to merge several, in order.
    #[arg(short, long = "input", value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output P3D file.
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Force overwrite the output file.
    #[arg(short, long)]
    pub force: bool,

    /// Don't add the history chunk.
    #[arg(long, alias = "no_history")]
    pub no_history: bool,

    /// Sort chunks.
    #[arg(short, long)]
    pub sort: bool,

    /// When sorting, sort chunks alphabetically within each type.
    #[arg(long, alias = "sort_alphabetical")]
    pub sort_alphabetical: bool,

    /// When sorting, add a history chunk at the start of each section.
    #[arg(long, alias = "sort_include_sections")]
    pub sort_include_sections: bool,

    /// Omit duplicate chunks when adding a file.
    #[arg(short, long)]
    pub dedupe: bool,

    /// Write a compressed P3D file.
    #[arg(short, long)]
    pub compress: bool,

    /// TOML file with base settings; flags switch options on top of it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply the command-line switches on top of `base`.
    pub fn merge_config(&self, mut base: MergeConfig) -> MergeConfig {
        base.force_overwrite |= self.force;
        base.skip_history |= self.no_history;
        base.sort.enabled |= self.sort;
        base.sort.alphabetical |= self.sort_alphabetical;
        base.sort.include_section_headers |= self.sort_include_sections;
        base.dedupe |= self.dedupe;
        base.compress |= self.compress;
        base
    }
}
