//! Small shared display helpers (§4.8 ambient). The canonical `$`-directive
//! formatter itself lives in `stratum-spec::format`, since it operates on a
//! whole spec DAG; this module only houses the colorized-segment
//! convention the CLI and canonical formatter both build on, grounded on
//! the teacher's `color_formats`/`colorize_spec` table.

use colored::{ColoredString, Colorize};

/// One coloring choice per spec sigil, matching the teacher's
/// `compiler_color`/`version_color`/`architecture_color`/... table.
pub enum Segment {
    Name,
    Version,
    Compiler,
    Architecture,
    VariantEnabled,
    VariantDisabled,
    Dependency,
}

pub fn colorize(segment: Segment, text: &str) -> ColoredString {
    match segment {
        Segment::Name => text.normal(),
        Segment::Version => text.cyan(),
        Segment::Compiler => text.green(),
        Segment::Architecture => text.magenta(),
        Segment::VariantEnabled => text.blue(),
        Segment::VariantDisabled => text.red(),
        Segment::Dependency => text.dimmed(),
    }
}
