use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;
use crate::record::Specification;

static CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bcontent="([^"]*)""#).unwrap());

/// The specification buckets we care about, in canonical display order.
/// Declaration order is the sort rank: derived `Ord` is load-bearing, since
/// extracted specifications are sorted by kind before the label tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SpecKind {
    Depth,
    Length,
    Height,
    Width,
    Shape,
    CenterSize,
    Material,
    Collection,
    ColorFinish,
    FaucetType,
    FaucetConnection,
    FlowRate,
    NumberOfBowls,
    DrainOpening,
    DrainLocation,
    OverallSinkSize,
    BowlSize,
    AdaCompliant,
    AsmeSpecifications,
    Application,
    CsaCertified,
    BrandModelCompatibility,
    CartridgeType,
    InstallationType,
    HandleType,
    SprayType,
    FaucetInstallation,
    WaterSenseLabeled,
    SpoutReach,
    SpoutType,
    Unknown,
}

impl SpecKind {
    /// Classify a raw label. Total and pure: exact, case-sensitive match on
    /// the display name plus a few known crawl aliases; everything else is
    /// `Unknown`.
    pub fn classify(label: &str) -> SpecKind {
        match label {
            "Depth" => SpecKind::Depth,
            "Length" => SpecKind::Length,
            "Height" => SpecKind::Height,
            "Width" => SpecKind::Width,
            "Shape" => SpecKind::Shape,
            "Center Size" => SpecKind::CenterSize,
            "Material" => SpecKind::Material,
            "Collection" => SpecKind::Collection,
            "Color/Finish" | "Color/Finish Category" => SpecKind::ColorFinish,
            "Faucet Type" => SpecKind::FaucetType,
            "Faucet Connection" => SpecKind::FaucetConnection,
            "Flow Rate" => SpecKind::FlowRate,
            "Number Of Bowls" => SpecKind::NumberOfBowls,
            "Drain Opening" => SpecKind::DrainOpening,
            "Drain Location" => SpecKind::DrainLocation,
            "Overall Sink Size" => SpecKind::OverallSinkSize,
            "Bowl Size" | "Bowl Size Single Or Left" | "Right Bowl Size" => SpecKind::BowlSize,
            "ADA Compliant" => SpecKind::AdaCompliant,
            "ASME Specifications" => SpecKind::AsmeSpecifications,
            "Application" => SpecKind::Application,
            "CSA Certified" => SpecKind::CsaCertified,
            "Brand / Model Compatibility" => SpecKind::BrandModelCompatibility,
            "Cartridge Type" => SpecKind::CartridgeType,
            "Installation Type" => SpecKind::InstallationType,
            "Handle Type" => SpecKind::HandleType,
            "Spray Type" => SpecKind::SprayType,
            "Faucet Installation" => SpecKind::FaucetInstallation,
            "WaterSense Labeled" => SpecKind::WaterSenseLabeled,
            "Spout Reach" => SpecKind::SpoutReach,
            "Spout Type" => SpecKind::SpoutType,
            _ => SpecKind::Unknown,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            SpecKind::Depth => "Depth",
            SpecKind::Length => "Length",
            SpecKind::Height => "Height",
            SpecKind::Width => "Width",
            SpecKind::Shape => "Shape",
            SpecKind::CenterSize => "Center Size",
            SpecKind::Material => "Material",
            SpecKind::Collection => "Collection",
            SpecKind::ColorFinish => "Color/Finish",
            SpecKind::FaucetType => "Faucet Type",
            SpecKind::FaucetConnection => "Faucet Connection",
            SpecKind::FlowRate => "Flow Rate",
            SpecKind::NumberOfBowls => "Number Of Bowls",
            SpecKind::DrainOpening => "Drain Opening",
            SpecKind::DrainLocation => "Drain Location",
            SpecKind::OverallSinkSize => "Overall Sink Size",
            SpecKind::BowlSize => "Bowl Size",
            SpecKind::AdaCompliant => "ADA Compliant",
            SpecKind::AsmeSpecifications => "ASME Specifications",
            SpecKind::Application => "Application",
            SpecKind::CsaCertified => "CSA Certified",
            SpecKind::BrandModelCompatibility => "Brand / Model Compatibility",
            SpecKind::CartridgeType => "Cartridge Type",
            SpecKind::InstallationType => "Installation Type",
            SpecKind::HandleType => "Handle Type",
            SpecKind::SprayType => "Spray Type",
            SpecKind::FaucetInstallation => "Faucet Installation",
            SpecKind::WaterSenseLabeled => "WaterSense Labeled",
            SpecKind::SpoutReach => "Spout Reach",
            SpecKind::SpoutType => "Spout Type",
            SpecKind::Unknown => "Unknown Type",
        }
    }
}

/// Scan a raw fragment for `content="label:value"` markers and build the
/// sorted specification list.
///
/// The fragment is treated as a flat text stream, not a document: every
/// `content="..."` attribute value is pattern-matched out, split on the
/// first delimiter, and collected. A marker without the delimiter fails the
/// whole extraction. Zero markers is fine and yields an empty list.
pub fn extract(input: &str, delimiter: char) -> Result<Vec<Specification>, ParseError> {
    let mut specs = Vec::new();

    for caps in CONTENT_RE.captures_iter(input) {
        let marker = &caps[1];
        match marker.split_once(delimiter) {
            Some((label, value)) => specs.push(Specification::new(label, value)),
            None => {
                return Err(ParseError::MalformedSpecMarker {
                    marker: marker.to_string(),
                    delimiter,
                })
            }
        }
    }

    specs.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.label.cmp(&b.label)));
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_stable() {
        for label in ["Depth", "Color/Finish Category", "Right Bowl Size", "???"] {
            assert_eq!(SpecKind::classify(label), SpecKind::classify(label));
        }
        assert_eq!(SpecKind::classify("Color/Finish Category"), SpecKind::ColorFinish);
        assert_eq!(SpecKind::classify("depth"), SpecKind::Unknown); // case-sensitive
    }

    #[test]
    fn bowl_size_matches_display_name_and_aliases() {
        assert_eq!(SpecKind::classify("Bowl Size"), SpecKind::BowlSize);
        assert_eq!(SpecKind::classify("Bowl Size Single Or Left"), SpecKind::BowlSize);
        assert_eq!(SpecKind::classify("Right Bowl Size"), SpecKind::BowlSize);
    }

    #[test]
    fn canonical_order_is_declaration_order() {
        assert!(SpecKind::Depth < SpecKind::Material);
        assert!(SpecKind::SpoutType < SpecKind::Unknown);
        assert_eq!(SpecKind::classify("Unknown Type"), SpecKind::Unknown);
    }

    #[test]
    fn extracts_and_sorts_by_kind() {
        let input = r#"<meta content="Material:Steel"/><meta content="Depth:10in"/>"#;
        let specs = extract(input, ':').unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].label, "Depth");
        assert_eq!(specs[0].value, "10in");
        assert_eq!(specs[1].label, "Material");
        assert_eq!(specs[1].value, "Steel");
    }

    #[test]
    fn same_kind_ties_break_on_label() {
        let input = concat!(
            r#"<meta content="Zeta:1"/>"#,
            r#"<meta content="Alpha:2"/>"#,
            r#"<meta content="Depth:3"/>"#,
        );
        let specs = extract(input, ':').unwrap();
        let labels: Vec<&str> = specs.iter().map(|s| s.label.as_str()).collect();
        // Depth is a known kind; Alpha/Zeta are both Unknown and sort by label.
        assert_eq!(labels, ["Depth", "Alpha", "Zeta"]);
    }

    #[test]
    fn value_keeps_text_after_first_delimiter() {
        let specs = extract(r#"content="Flow Rate:1.5:gpm""#, ':').unwrap();
        assert_eq!(specs[0].label, "Flow Rate");
        assert_eq!(specs[0].value, "1.5:gpm");
    }

    #[test]
    fn marker_without_delimiter_is_an_error() {
        let err = extract(r#"<meta content="BadMarkerNoDelimiter"/>"#, ':').unwrap_err();
        assert!(matches!(err, ParseError::MalformedSpecMarker { marker, .. }
            if marker == "BadMarkerNoDelimiter"));
    }

    #[test]
    fn zero_markers_yields_empty_list() {
        assert!(extract("<div>no markers here</div>", ':').unwrap().is_empty());
    }
}
