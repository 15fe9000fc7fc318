//! Prometheus text exposition format.
//!
//! Renders collected samples into the text format scraped by a Prometheus
//! server or compatible agent. Every sample carries its own uniquely-named
//! descriptor, so each one gets its own HELP/TYPE/value triplet and no
//! labels are produced.

use crate::collector::Sample;

/// Render samples into Prometheus text format.
pub fn render_text(samples: &[Sample<'_>]) -> String {
    let mut out = String::new();
    for sample in samples {
        let d = sample.descriptor;
        out.push_str(&format!("# HELP {} {}\n", d.name(), d.help()));
        out.push_str(&format!("# TYPE {} {}\n", d.name(), d.kind().as_str()));
        out.push_str(&format!("{} {}\n", d.name(), sample.value));
    }
    out
}
