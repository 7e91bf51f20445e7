//! Pipeline driver: shape every element of a source into a sink.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::osm::read_elements;
use crate::shaper::{shape, ElementRejection, ShapeOutcome};
use crate::sink::{DocumentSink, JsonLinesSink};
use crate::types::RawElement;

/// Run-time knobs for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after reading this many elements.
    pub limit: Option<usize>,
}

impl RunOptions {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Counts collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Elements taken from the source.
    pub read: usize,
    /// Documents handed to the sink.
    pub accepted: usize,
    /// Rejected elements per reason.
    pub rejected: BTreeMap<ElementRejection, usize>,
}

impl RunStats {
    /// Total number of rejected elements.
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    fn record_rejection(&mut self, reason: ElementRejection) {
        *self.rejected.entry(reason).or_default() += 1;
    }
}

/// Shape each element in order and hand accepted documents to `sink`.
///
/// Rejected elements are counted and skipped. Only sink failures abort the
/// run. The sink is finished once the source is exhausted or the limit is
/// reached.
///
/// # Examples
/// ```
/// use osm_shaper::pipeline::{run, RunOptions};
/// use osm_shaper::sink::MemorySink;
/// use osm_shaper::types::{ElementKind, RawElement};
///
/// let elements = vec![
///     RawElement::new(ElementKind::Point).with_tag("amenity", "cafe"),
///     RawElement::new(ElementKind::from_tag("relation")),
/// ];
/// let mut sink = MemorySink::new();
/// let stats = run(elements, &mut sink, &RunOptions::default()).unwrap();
/// assert_eq!(stats.accepted, 1);
/// assert_eq!(stats.rejected_total(), 1);
/// ```
pub fn run<I, S>(source: I, sink: &mut S, options: &RunOptions) -> Result<RunStats>
where
    I: IntoIterator<Item = RawElement>,
    S: DocumentSink + ?Sized,
{
    let mut stats = RunStats::default();

    for element in source {
        if options.limit.is_some_and(|limit| stats.read >= limit) {
            tracing::debug!(limit = stats.read, "Element limit reached, stopping");
            break;
        }
        stats.read += 1;

        match shape(&element) {
            ShapeOutcome::Accepted(document) => {
                sink.accept(document)?;
                stats.accepted += 1;
            }
            ShapeOutcome::Rejected(reason) => {
                tracing::trace!(
                    kind = element.kind.as_str(),
                    id = element.attribute("id").unwrap_or("?"),
                    %reason,
                    "Element rejected"
                );
                stats.record_rejection(reason);
            }
        }
    }

    sink.finish()?;

    tracing::info!(
        read = stats.read,
        accepted = stats.accepted,
        rejected = stats.rejected_total(),
        "Pipeline run complete"
    );

    Ok(stats)
}

/// Shape an OSM XML file into a JSON Lines file.
///
/// # Arguments
/// * `input` - Path to the `.osm` extract
/// * `output` - Path of the JSON Lines file to create
/// * `options` - Run options
pub fn process_file(input: &Path, output: &Path, options: &RunOptions) -> Result<RunStats> {
    let elements = read_elements(input)?;
    let mut sink = JsonLinesSink::create(output)?;
    run(elements, &mut sink, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShaperError;
    use crate::sink::MemorySink;
    use crate::types::{ElementKind, NormalizedDocument};

    fn named(name: &str) -> RawElement {
        RawElement::new(ElementKind::Point).with_tag("name", name)
    }

    fn outside(name: &str) -> RawElement {
        named(name)
            .with_attribute("lat", "44.5")
            .with_attribute("lon", "-93.25")
    }

    fn names(sink: &MemorySink) -> Vec<&str> {
        sink.documents().iter().filter_map(|d| d.field("name")).collect()
    }

    #[test]
    fn test_run_preserves_order_and_skips_rejections() {
        let source = vec![named("A"), outside("X"), named("B"), named("C")];
        let mut sink = MemorySink::new();
        let stats = run(source, &mut sink, &RunOptions::default()).unwrap();

        assert_eq!(names(&sink), ["A", "B", "C"]);
        assert_eq!(stats.read, 4);
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.rejected.get(&ElementRejection::OutsideRegion), Some(&1));
    }

    #[test]
    fn test_run_counts_rejections_by_reason() {
        let source = vec![
            RawElement::new(ElementKind::from_tag("relation")),
            RawElement::new(ElementKind::from_tag("bounds")),
            outside("X"),
        ];
        let mut sink = MemorySink::new();
        let stats = run(source, &mut sink, &RunOptions::default()).unwrap();

        assert_eq!(stats.accepted, 0);
        assert_eq!(stats.rejected_total(), 3);
        assert_eq!(stats.rejected.get(&ElementRejection::UnsupportedType), Some(&2));
    }

    #[test]
    fn test_run_respects_limit() {
        let source = vec![named("A"), named("B"), named("C")];
        let mut sink = MemorySink::new();
        let stats = run(source, &mut sink, &RunOptions::default().with_limit(2)).unwrap();

        assert_eq!(stats.read, 2);
        assert_eq!(names(&sink), ["A", "B"]);
    }

    #[test]
    fn test_run_empty_source() {
        let mut sink = MemorySink::new();
        let stats = run(Vec::new(), &mut sink, &RunOptions::default()).unwrap();
        assert_eq!(stats, RunStats::default());
    }

    struct FailingSink;

    impl DocumentSink for FailingSink {
        fn accept(&mut self, _document: NormalizedDocument) -> Result<()> {
            Err(ShaperError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_run_propagates_sink_errors() {
        let result = run(vec![named("A")], &mut FailingSink, &RunOptions::default());
        assert!(matches!(result, Err(ShaperError::Io(_))));
    }

    #[test]
    fn test_run_rejections_do_not_touch_sink() {
        let result = run(vec![outside("X")], &mut FailingSink, &RunOptions::default());
        assert_eq!(result.unwrap().rejected_total(), 1);
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("map.osm");
        let output = dir.path().join("map.json");
        std::fs::write(
            &input,
            r#"<osm><node id="1" lat="44.98" lon="-93.27"><tag k="amenity" v="cafe"/></node>
               <node id="2" lat="44.5" lon="-93.27"/></osm>"#,
        )
        .unwrap();

        let stats = process_file(&input, &output, &RunOptions::default()).unwrap();
        assert_eq!(stats.accepted, 1);

        let content = std::fs::read_to_string(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["amenity"], "cafe");
        assert_eq!(value["position"][0], 44.98);
    }
}
