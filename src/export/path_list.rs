use crate::domain::routing::PathResult;
use crate::domain::utils::id::NodeId;
use crate::error::Result;
use crate::export::PLACEHOLDER;
use std::io::Write;

/// Writes the ranked paths of a single-pair query, one line per path.
///
/// A disconnected pair is a normal answer: it produces a single `# no path` line.
pub fn write_path_list<W: Write>(mut writer: W, source: &NodeId, target: &NodeId, paths: &[PathResult]) -> Result<()> {
    if paths.is_empty() {
        writeln!(writer, "# no path from {} to {}", source, target)?;
        return Ok(());
    }

    for (rank, path) in paths.iter().enumerate() {
        let bottleneck = path.bottleneck.as_ref().map(|b| format!("{} ({})", b.capacity, b.link)).unwrap_or_else(|| PLACEHOLDER.to_string());
        writeln!(writer, "#{} cost {} hops {} bottleneck {}: {}", rank + 1, path.cost, path.hops, bottleneck, path.describe())?;
    }

    Ok(())
}
